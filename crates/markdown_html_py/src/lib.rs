use std::io;
use std::path::{Path, PathBuf};

use markdown_html::{
    classify_lines_with, parse_with, render_from_path, ClassifiedLine, HeadingOverflow,
    ParseOptions,
};
use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyValueError};
use pyo3::prelude::*;

create_exception!(markdown_html_py, MarkdownHtmlError, PyException);

#[pyfunction(signature = (content, *, heading_overflow="paragraph"))]
fn parse(content: &str, heading_overflow: &str) -> PyResult<String> {
    let options = build_options(heading_overflow)?;
    Ok(parse_with(content, &options))
}

#[pyfunction(signature = (path, *, heading_overflow="paragraph"))]
fn parse_file(path: &str, heading_overflow: &str) -> PyResult<String> {
    let options = build_options(heading_overflow)?;
    let path_buf = PathBuf::from(path);
    render_from_path(&path_buf, &options).map_err(|err| map_io_error(err, &path_buf))
}

/// Returns `(kind, level, text)` per line; `level` is 0 for non-headings.
#[pyfunction(signature = (content, *, heading_overflow="paragraph"))]
fn classify(content: &str, heading_overflow: &str) -> PyResult<Vec<(String, u8, String)>> {
    let options = build_options(heading_overflow)?;
    Ok(classify_lines_with(content, &options)
        .map(|line| {
            let level = match line {
                ClassifiedLine::Heading { level, .. } => level.get(),
                ClassifiedLine::ListItem { .. } | ClassifiedLine::Paragraph { .. } => 0,
            };
            (line.kind_name().to_owned(), level, line.text().to_owned())
        })
        .collect())
}

#[pymodule]
fn markdown_html_py(py: Python, module: &PyModule) -> PyResult<()> {
    module.add_function(wrap_pyfunction!(parse, module)?)?;
    module.add_function(wrap_pyfunction!(parse_file, module)?)?;
    module.add_function(wrap_pyfunction!(classify, module)?)?;
    module.add("MarkdownHtmlError", py.get_type::<MarkdownHtmlError>())?;
    Ok(())
}

fn build_options(heading_overflow: &str) -> PyResult<ParseOptions> {
    let overflow = heading_overflow
        .parse::<HeadingOverflow>()
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    Ok(ParseOptions::default().with_heading_overflow(overflow))
}

fn map_io_error(err: io::Error, path: &Path) -> PyErr {
    let message = match err.kind() {
        io::ErrorKind::NotFound => format!("File not found: {}", path.display()),
        io::ErrorKind::PermissionDenied => format!("Permission denied: {}", path.display()),
        io::ErrorKind::InvalidData => format!("File is not valid UTF-8: {}", path.display()),
        _ => err.to_string(),
    };
    MarkdownHtmlError::new_err(message)
}
