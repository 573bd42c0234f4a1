//! View Router
//!
//! Pure mapping from a navigation path to a screen. Evaluated on every
//! request, so browser back/forward needs no special handling: a full
//! navigation simply re-runs the mapping.

/// The four screens of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// `/cocina` - pending orders, mark-ready action
    Cocina,
    /// `/clientes` - recently completed orders
    Clientes,
    /// `/cajero` - order entry
    Cajero,
    /// Anything else - landing page with links to the three screens
    Landing,
}

impl Screen {
    /// Resolve a navigation path. Unrecognized paths (including `/`)
    /// land on the landing page.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/cocina" => Self::Cocina,
            "/clientes" => Self::Clientes,
            "/cajero" => Self::Cajero,
            _ => Self::Landing,
        }
    }

    /// Canonical path for this screen
    pub fn path(&self) -> &'static str {
        match self {
            Self::Cocina => "/cocina",
            Self::Clientes => "/clientes",
            Self::Cajero => "/cajero",
            Self::Landing => "/",
        }
    }

    /// Display name shown on the landing page
    pub fn title(&self) -> &'static str {
        match self {
            Self::Cocina => "Cocina",
            Self::Clientes => "Clientes",
            Self::Cajero => "Cajero",
            Self::Landing => "ListoYa",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_map_to_their_screens() {
        assert_eq!(Screen::from_path("/cocina"), Screen::Cocina);
        assert_eq!(Screen::from_path("/clientes"), Screen::Clientes);
        assert_eq!(Screen::from_path("/cajero"), Screen::Cajero);
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(Screen::from_path("/cocina/"), Screen::Cocina);
    }

    #[test]
    fn everything_else_lands_on_landing() {
        assert_eq!(Screen::from_path("/"), Screen::Landing);
        assert_eq!(Screen::from_path(""), Screen::Landing);
        assert_eq!(Screen::from_path("/admin"), Screen::Landing);
        assert_eq!(Screen::from_path("/cocina/extra"), Screen::Landing);
        assert_eq!(Screen::from_path("/COCINA"), Screen::Landing);
    }
}
