use std::path::Path;

use mime_guess::mime;

use crate::ShellError;

/// Rejects anything whose extension does not map to `text/plain`.
pub fn ensure_plain_text(path: &Path) -> Result<(), ShellError> {
    let guessed = mime_guess::from_path(path).first_or_octet_stream();
    if guessed.type_() == mime::TEXT && guessed.subtype() == mime::PLAIN {
        return Ok(());
    }
    Err(ShellError::UnsupportedFile {
        path: path.to_path_buf(),
        mime: guessed.essence_str().to_string(),
    })
}

/// Reads a dropped or selected file. The content is returned verbatim.
pub async fn read_text_file(path: &Path) -> Result<String, ShellError> {
    ensure_plain_text(path)?;
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ShellError::ReadFile {
            path: path.to_path_buf(),
            source,
        })
}
