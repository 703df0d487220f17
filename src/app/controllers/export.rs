use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::app::infrastructure::download::DownloadSink;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::preview::CardScene;
use crate::app::services::raster::Rasterizer;

/// What a finished export produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReceipt {
    pub suggested_name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// An export running on a worker thread.
///
/// The job owns a copy of the scene taken when it was triggered, so later
/// edits to the widget never leak into it. There is no cancellation; drop
/// the job to detach it.
pub struct ExportJob {
    suggested_name: String,
    handle: JoinHandle<Result<ExportReceipt>>,
}

impl ExportJob {
    pub(crate) fn spawn(
        scene: CardScene,
        suggested_name: String,
        rasterizer: Arc<Rasterizer>,
        sink: Arc<dyn DownloadSink>,
    ) -> Self {
        let name = suggested_name.clone();
        let handle = std::thread::spawn(move || {
            let (width, height) = rasterizer.output_size(&scene);
            let png = rasterizer.render_png(&scene)?;
            let path = sink.save(&name, &png)?;
            log::debug!("Exported {} ({}x{}) to {}", name, width, height, path.display());
            Ok(ExportReceipt { suggested_name: name, path, width, height })
        });
        Self { suggested_name, handle }
    }

    /// File name offered to the sink, fixed at trigger time.
    pub fn suggested_name(&self) -> &str {
        &self.suggested_name
    }

    /// Block until the export completes.
    pub fn join(self) -> Result<ExportReceipt> {
        let name = self.suggested_name;
        match self.handle.join() {
            Ok(result) => {
                if let Err(e) = &result {
                    log::warn!("Export of {} failed: {}", name, e);
                }
                result
            }
            Err(_) => Err(AppError::Export(format!("export worker for {} panicked", name))),
        }
    }
}
