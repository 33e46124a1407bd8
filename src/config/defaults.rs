//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn language() -> String {
        "en".into()
    }

    pub fn card_description_chars() -> usize {
        160
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    pub fn source() -> String {
        "content".into()
    }

    pub fn manifest() -> String {
        "projects.json".into()
    }

    pub fn projects_dir() -> String {
        "projects".into()
    }
}

// ============================================================================
// [markdown] Section Defaults
// ============================================================================

pub mod markdown {
    pub fn theme() -> String {
        "base16-ocean.dark".into()
    }

    pub fn copy_ack_ms() -> u64 {
        2000
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }

    pub fn fetch_timeout_ms() -> u64 {
        10_000
    }
}

// ============================================================================
// [about] Section Defaults
// ============================================================================

pub mod about {
    pub fn heading() -> String {
        "About Me".into()
    }

    pub fn documents_prefix() -> String {
        "assets/PDF".into()
    }
}
