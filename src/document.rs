use crate::error::Error;
use crate::table::{Conversion, SubstitutionPlan};
use log::debug;
use std::path::{Path, PathBuf};

/// A text file held fully in memory between load and save.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    content: String,
}

impl Document {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|source| Error::DocumentRead {
            path: path.clone(),
            source,
        })?;
        debug!("read {path:?}: {} bytes", bytes.len());
        let content = String::from_utf8(bytes).map_err(|source| Error::Encoding {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, content })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Runs the plan over the content and keeps the result.
    pub fn convert(&mut self, plan: &SubstitutionPlan) -> Conversion {
        let conversion = plan.apply(&self.content);
        self.content.clone_from(&conversion.text);
        conversion
    }

    /// Overwrites the file this document was loaded from.
    pub fn save(&self) -> Result<(), Error> {
        std::fs::write(&self.path, self.content.as_bytes()).map_err(|source| {
            Error::DocumentWrite {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!("wrote {:?}: {} bytes", self.path, self.content.len());
        Ok(())
    }
}
