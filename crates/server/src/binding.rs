/// Which flavour of the item API a process serves.
///
/// Both expose the same routes over the same store; they differ in how
/// request bodies are bound and how errors are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    /// Lenient bodies, partial updates, `{"message": ...}` errors.
    Classic,
    /// Schema-checked bodies, full replacement on update, `{"detail": ...}`
    /// errors and an OpenAPI document.
    Typed,
}

impl Binding {
    pub fn name(self) -> &'static str {
        match self {
            Binding::Classic => "classic",
            Binding::Typed => "typed",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Binding::Classic => "Classic",
            Binding::Typed => "Typed",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Binding::Classic => 5000,
            Binding::Typed => 8000,
        }
    }

    /// Key of the single field in error bodies.
    pub fn error_key(self) -> &'static str {
        match self {
            Binding::Classic => "message",
            Binding::Typed => "detail",
        }
    }

    /// How the id segment is written in the `GET /` endpoint listing.
    pub fn id_placeholder(self) -> &'static str {
        match self {
            Binding::Classic => "<id>",
            Binding::Typed => "{item_id}",
        }
    }
}
