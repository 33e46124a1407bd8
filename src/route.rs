//! Site routes and their URLs / output files.
//!
//! | Path                   | Route                         |
//! |------------------------|-------------------------------|
//! | `/`                    | [`Route::About`]              |
//! | `/projects/`           | [`Route::Projects`] no filter |
//! | `/projects/tag/{tag}/` | [`Route::Projects`] filtered  |
//! | `/projects/{id}/`      | [`Route::Project`]            |
//! | `/static/{file}`       | [`Route::Static`]             |
//! | anything else          | [`Route::Asset`]              |

use std::path::PathBuf;

/// URL directory the assets dir is published under.
pub const ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    About,
    Projects { tag: Option<String> },
    Project { id: String },
    Static(String),
    Asset(String),
}

impl Route {
    /// Resolve a request path (query string allowed).
    pub fn parse(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let mut segments: Vec<String> = path
            .split('/')
            .filter(|seg| !seg.is_empty())
            .map(|seg| {
                urlencoding::decode(seg)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| seg.to_owned())
            })
            .collect();

        if segments.last().is_some_and(|seg| seg == "index.html") {
            segments.pop();
        }

        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        match segments.as_slice() {
            [] => Self::About,
            ["projects"] => Self::Projects { tag: None },
            ["projects", "tag", tag] => Self::Projects {
                tag: Some((*tag).to_owned()),
            },
            ["projects", id] => Self::Project {
                id: (*id).to_owned(),
            },
            ["static", file] => Self::Static((*file).to_owned()),
            rest => Self::Asset(rest.join("/")),
        }
    }

    /// Site-relative URL.
    pub fn href(&self) -> String {
        match self {
            Self::About => "/".into(),
            Self::Projects { tag: None } => "/projects/".into(),
            Self::Projects { tag: Some(tag) } => {
                format!("/projects/tag/{}/", urlencoding::encode(tag))
            }
            Self::Project { id } => format!("/projects/{}/", urlencoding::encode(id)),
            Self::Static(file) => format!("/static/{}", urlencoding::encode(file)),
            Self::Asset(path) => {
                let encoded: Vec<_> = path.split('/').map(urlencoding::encode).collect();
                format!("/{}", encoded.join("/"))
            }
        }
    }

    /// Path inside the assets dir for an asset route under `/assets/`.
    pub fn asset_path(&self) -> Option<&str> {
        match self {
            Self::Asset(path) => path
                .strip_prefix(ASSETS_DIR)
                .and_then(|rest| rest.strip_prefix('/'))
                .filter(|rest| rest.split('/').all(|seg| dir_name(seg).is_some())),
            _ => None,
        }
    }

    /// File written for this route by `folio build`, relative to the output dir.
    ///
    /// `None` for routes whose key cannot be a single directory name.
    pub fn output_path(&self) -> Option<PathBuf> {
        let dir = match self {
            Self::About => PathBuf::new(),
            Self::Projects { tag: None } => PathBuf::from("projects"),
            Self::Projects { tag: Some(tag) } => {
                PathBuf::from("projects").join("tag").join(dir_name(tag)?)
            }
            Self::Project { id } => PathBuf::from("projects").join(dir_name(id)?),
            Self::Static(file) => return Some(PathBuf::from("static").join(dir_name(file)?)),
            Self::Asset(_) => return None,
        };
        Some(dir.join("index.html"))
    }
}

/// `name` when usable as one path component.
fn dir_name(name: &str) -> Option<&str> {
    let unsafe_name = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    (!unsafe_name).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pages() {
        assert_eq!(Route::parse("/"), Route::About);
        assert_eq!(Route::parse("/index.html"), Route::About);
        assert_eq!(Route::parse("/projects"), Route::Projects { tag: None });
        assert_eq!(Route::parse("/projects/?x=1"), Route::Projects { tag: None });
        assert_eq!(
            Route::parse("/projects/hft-execution/"),
            Route::Project {
                id: "hft-execution".into()
            }
        );
    }

    #[test]
    fn test_parse_tag_decodes() {
        assert_eq!(
            Route::parse("/projects/tag/C%2B%2B/"),
            Route::Projects {
                tag: Some("C++".into())
            }
        );
        assert_eq!(
            Route::parse("/projects/tag/Machine%20Learning/index.html"),
            Route::Projects {
                tag: Some("Machine Learning".into())
            }
        );
    }

    #[test]
    fn test_parse_static_and_assets() {
        assert_eq!(Route::parse("/static/folio.css"), Route::Static("folio.css".into()));
        assert_eq!(
            Route::parse("/assets/PDF/Resume.pdf"),
            Route::Asset("assets/PDF/Resume.pdf".into())
        );
    }

    #[test]
    fn test_asset_path() {
        assert_eq!(
            Route::parse("/assets/PDF/Resume%20v2.pdf").asset_path(),
            Some("PDF/Resume v2.pdf")
        );
        assert_eq!(Route::parse("/favicon.ico").asset_path(), None);
        assert_eq!(Route::parse("/assets/../folio.toml").asset_path(), None);
        assert_eq!(Route::About.asset_path(), None);
    }

    #[test]
    fn test_href_round_trip() {
        let routes = [
            Route::About,
            Route::Projects { tag: None },
            Route::Projects {
                tag: Some("C++".into()),
            },
            Route::Project { id: "a b".into() },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.href()), route);
        }
    }

    #[test]
    fn test_output_paths() {
        assert_eq!(Route::About.output_path(), Some(PathBuf::from("index.html")));
        assert_eq!(
            Route::Projects {
                tag: Some("C++".into())
            }
            .output_path(),
            Some(PathBuf::from("projects/tag/C++/index.html"))
        );
        assert_eq!(
            Route::Project { id: "maze".into() }.output_path(),
            Some(PathBuf::from("projects/maze/index.html"))
        );
    }

    #[test]
    fn test_output_path_rejects_separators() {
        assert_eq!(
            Route::Projects {
                tag: Some("CI/CD".into())
            }
            .output_path(),
            None
        );
        assert_eq!(Route::Project { id: "..".into() }.output_path(), None);
        assert_eq!(Route::Asset("x".into()).output_path(), None);
    }
}
