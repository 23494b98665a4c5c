use std::io;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;

use dashboard_logging::{dash_debug, dash_info};

use crate::filename::local_filename;
use crate::persist::AtomicFileWriter;
use crate::{FailureKind, Gateway, GatewayError, GatewayEvent, Request};

/// Runs gateway requests on a background tokio runtime and hands the
/// results back over a channel the UI thread polls.
pub struct GatewayHandle {
    cmd_tx: mpsc::Sender<Request>,
    event_rx: mpsc::Receiver<GatewayEvent>,
}

impl GatewayHandle {
    pub fn new(gateway: Arc<dyn Gateway>, download_dir: PathBuf) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Request>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let writer = Arc::new(AtomicFileWriter::new(download_dir));

        thread::Builder::new()
            .name("dashboard-gateway".into())
            .spawn(move || {
                while let Ok(request) = cmd_rx.recv() {
                    let gateway = gateway.clone();
                    let writer = writer.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_request(gateway.as_ref(), &writer, request).await;
                        let _ = event_tx.send(event);
                    });
                }
                dash_debug!("gateway command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, request: Request) {
        let _ = self.cmd_tx.send(request);
    }

    pub fn try_recv(&self) -> Option<GatewayEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event arrives or the worker is gone.
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<GatewayEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

pub(crate) async fn handle_request(
    gateway: &dyn Gateway,
    writer: &AtomicFileWriter,
    request: Request,
) -> GatewayEvent {
    match request {
        Request::Login { username, password } => {
            GatewayEvent::Login(gateway.login(&username, &password).await)
        }
        Request::News {
            consumer,
            ticket,
            query,
        } => GatewayEvent::News {
            consumer,
            ticket,
            result: gateway.news(&query).await,
        },
        Request::Search { ticket, query } => GatewayEvent::Search {
            ticket,
            result: gateway.search(&query, ticket.page).await,
        },
        Request::Stock { purpose, symbol } => {
            let result = gateway.stock(&symbol).await;
            GatewayEvent::Stock {
                purpose,
                symbol,
                result,
            }
        }
        Request::Uploads {
            consumer,
            generation,
        } => GatewayEvent::Uploads {
            consumer,
            generation,
            result: gateway.list_uploads().await,
        },
        Request::Upload { path } => GatewayEvent::Upload(upload(gateway, &path).await),
        Request::Download { filename } => {
            let result = download(gateway, writer, &filename).await;
            GatewayEvent::Download { filename, result }
        }
        Request::History { generation } => GatewayEvent::History {
            generation,
            result: gateway.history().await,
        },
        Request::BuildReport(report) => GatewayEvent::BuildReport(gateway.build_report(&report).await),
        Request::QuickReport => GatewayEvent::QuickReport(gateway.generate_report().await),
    }
}

async fn upload(gateway: &dyn Gateway, path: &Path) -> Result<(), GatewayError> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| GatewayError::new(FailureKind::LocalIo, "path has no file name"))?;
    let contents = tokio::fs::read(path)
        .await
        .map_err(|err| GatewayError::new(FailureKind::LocalIo, err.to_string()))?;
    dash_info!("uploading {} ({} bytes)", filename, contents.len());
    gateway.upload_file(&filename, contents).await
}

async fn download(
    gateway: &dyn Gateway,
    writer: &AtomicFileWriter,
    filename: &str,
) -> Result<PathBuf, GatewayError> {
    let bytes = gateway.download_upload(filename).await?;
    let target = local_filename(filename);
    let saved = writer
        .write(&target, &bytes)
        .map_err(|err| GatewayError::new(FailureKind::LocalIo, err.to_string()))?;
    dash_info!("saved {} to {}", filename, saved.display());
    Ok(saved)
}

