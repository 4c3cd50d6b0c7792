use std::path::PathBuf;

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_entry() -> PathBuf {
    PathBuf::from("src/index.js")
}

pub(crate) fn default_extensions() -> Vec<String> {
    vec![".js".to_string(), ".wasm".to_string(), ".css".to_string()]
}

pub(crate) fn default_output_path() -> PathBuf {
    PathBuf::from("../..")
}

pub(crate) fn default_output_filename() -> String {
    "bundle.js".to_string()
}

pub(crate) fn default_html_filename() -> String {
    "index.html".to_string()
}

pub(crate) fn default_template() -> PathBuf {
    PathBuf::from("./src/index.html")
}
