use thiserror::Error;

/// Errors produced while loading content or rendering the invitation
///
/// The widgets themselves never fail: an unparseable countdown target simply
/// counts as arrived and clipboard failures are swallowed. What can fail is
/// the setup around them.
#[derive(Debug, Error)]
pub enum InvitationError {
    /// Reading the content file or writing a rendered page failed
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The content file is not valid JSON for `InvitationContent`
    #[error("invalid content file {path}: {source}")]
    Content {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A carousel was configured without any images
    #[error("image pool `{0}` must contain at least one image")]
    EmptyPool(String),

    #[cfg(feature = "web")]
    #[error("template error: {0}")]
    Template(#[source] handlebars::TemplateError),

    #[cfg(feature = "web")]
    #[error("render error: {0}")]
    Render(#[source] handlebars::RenderError),
}

pub type Result<T> = std::result::Result<T, InvitationError>;
