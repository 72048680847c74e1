use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tf_core::error::CoreError;
use tf_core::frame::AnimationDocument;

/// Écrit un document sous forme de littéral JavaScript :
/// `window.GIF={frames:["…","…"],delay:100};`
///
/// Chaque frame est entourée de guillemets doubles ; seuls les `"` internes
/// sont échappés. Le jeton de ligne `\n` passe tel quel.
///
/// # Example
/// ```
/// use tf_core::frame::AnimationDocument;
/// use tf_export::JsWriter;
///
/// let doc = AnimationDocument { frames: vec!["A\\n".into()], delay: 100 };
/// let js = JsWriter::new("window.GIF").to_literal(&doc);
/// assert_eq!(js, r#"window.GIF={frames:["A\n"],delay:100};"#);
/// ```
#[derive(Clone, Debug)]
pub struct JsWriter {
    namespace: String,
}

impl JsWriter {
    /// Writer assigning onto `namespace` (e.g. `window.GIF`).
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Stream the literal into `out`.
    ///
    /// # Errors
    /// Propagates I/O errors from `out`.
    pub fn write_to<W: Write>(&self, doc: &AnimationDocument, out: &mut W) -> std::io::Result<()> {
        out.write_all(self.to_literal(doc).as_bytes())
    }

    /// Literal as an owned string.
    #[must_use]
    pub fn to_literal(&self, doc: &AnimationDocument) -> String {
        let quoted: Vec<String> = doc.frames.iter().map(|f| quote(f)).collect();
        format!(
            "{}={{frames:[{}],delay:{}}};",
            self.namespace,
            quoted.join(","),
            doc.delay
        )
    }

    /// Écrit le littéral dans `path`, en écrasant le fichier existant.
    ///
    /// # Errors
    /// Returns [`CoreError::Io`] if the file cannot be created or written.
    pub fn save(&self, doc: &AnimationDocument, path: &Path) -> Result<(), CoreError> {
        let io_err = |source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        self.write_to(doc, &mut out).map_err(io_err)?;
        out.flush().map_err(io_err)?;
        log::info!(
            "{} frame(s) écrite(s) dans {}",
            doc.frames.len(),
            path.display()
        );
        Ok(())
    }
}

/// Wrap in double quotes, backslash-escaping embedded quotes only.
fn quote(frame: &str) -> String {
    let mut s = String::with_capacity(frame.len() + 2);
    s.push('"');
    s.push_str(&frame.replace('"', "\\\""));
    s.push('"');
    s
}
