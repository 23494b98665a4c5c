use std::path::PathBuf;

use crate::{Consumer, Effect, FetchFailure, UploadRecord};

pub const UPLOAD_SUCCEEDED: &str = "File uploaded successfully!";
pub const UPLOAD_FAILED: &str = "Upload failed!";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadsPanel {
    pub(crate) records: Vec<UploadRecord>,
    pub(crate) chosen: Option<PathBuf>,
    pub(crate) uploading: bool,
    pub(crate) loading: bool,
    pub(crate) generation: u64,
}

impl UploadsPanel {
    pub fn records(&self) -> &[UploadRecord] {
        &self.records
    }

    /// Empty panel; list replies still in flight become stale.
    pub(crate) fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    pub(crate) fn refresh(&mut self) -> Effect {
        self.loading = true;
        Effect::FetchUploads {
            consumer: Consumer::Dashboard,
            generation: self.generation,
        }
    }

    /// Returns `false` for a reply addressed to an earlier generation.
    pub(crate) fn loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<UploadRecord>, FetchFailure>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        if let Ok(records) = result {
            self.records = records;
        }
        true
    }

    pub(crate) fn submit(&mut self) -> Option<Effect> {
        if self.uploading {
            return None;
        }
        let path = self.chosen.clone()?;
        self.uploading = true;
        Some(Effect::UploadFile { path })
    }

    /// Returns the list refresh to issue after a successful upload.
    pub(crate) fn finished(&mut self, succeeded: bool) -> Option<Effect> {
        self.uploading = false;
        if succeeded {
            self.chosen = None;
            Some(self.refresh())
        } else {
            None
        }
    }
}
