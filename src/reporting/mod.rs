pub mod formatter;
pub mod archive;
pub mod pdf;

pub use formatter::{render_text, slugify};
pub use archive::{archive_name, build_archive, EMPTY_ARCHIVE_MESSAGE};
pub use pdf::render_pdf;
