//! Stylesheet and script shipped inside the binary.

/// A file served under `/static/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticFile {
    pub name: &'static str,
    pub content_type: &'static str,
    pub body: &'static str,
}

pub const STATIC_FILES: &[StaticFile] = &[
    StaticFile {
        name: "folio.css",
        content_type: "text/css; charset=utf-8",
        body: include_str!("../embed/folio.css"),
    },
    StaticFile {
        name: "folio.js",
        content_type: "application/javascript; charset=utf-8",
        body: include_str!("../embed/folio.js"),
    },
];

pub fn lookup(name: &str) -> Option<&'static StaticFile> {
    STATIC_FILES.iter().find(|file| file.name == name)
}
