use crate::{Alpha, ColorLiteral, ColorValue, SvgShapeError, extract, normalize};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

// `normalize("#ff000080")` -> `(255, 0, 0, 128.0)`; an hsla() percentage alpha
// comes back as a string such as "50%".
#[pyfunction]
#[pyo3(name = "normalize")]
fn py_normalize(py: Python<'_>, color: &str) -> PyResult<(u8, u8, u8, PyObject)> {
    let value = normalize(&ColorLiteral::classify(color)).map_err(to_py_err)?;
    Ok(color_tuple(py, value))
}

#[pyfunction]
#[pyo3(name = "normalize_packed")]
fn py_normalize_packed(py: Python<'_>, value: i64) -> PyResult<(u8, u8, u8, PyObject)> {
    let value = normalize(&ColorLiteral::Packed(value)).map_err(to_py_err)?;
    Ok(color_tuple(py, value))
}

fn color_tuple(py: Python<'_>, value: ColorValue) -> (u8, u8, u8, PyObject) {
    let alpha = match value.a {
        Alpha::Value(v) => v.into_py(py),
        Alpha::Percent(_) => value.a.to_string().into_py(py),
    };
    (value.r, value.g, value.b, alpha)
}

#[pyfunction]
#[pyo3(name = "extract", signature = (svg, pretty=false))]
fn py_extract(svg: &str, pretty: bool) -> PyResult<String> {
    let doc = extract(svg).map_err(to_py_err)?;
    let json = if pretty {
        doc.to_json_pretty()
    } else {
        doc.to_json()
    };
    json.map_err(to_py_err)
}

#[pyfunction]
#[pyo3(name = "fingerprint")]
fn py_fingerprint(svg: &str) -> PyResult<String> {
    extract(svg)
        .and_then(|doc| doc.fingerprint())
        .map_err(to_py_err)
}

#[pymodule]
fn _svgshape(_py: Python<'_>, module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_function(wrap_pyfunction!(py_normalize, module)?)?;
    module.add_function(wrap_pyfunction!(py_normalize_packed, module)?)?;
    module.add_function(wrap_pyfunction!(py_extract, module)?)?;
    module.add_function(wrap_pyfunction!(py_fingerprint, module)?)?;
    Ok(())
}

fn to_py_err(err: SvgShapeError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
