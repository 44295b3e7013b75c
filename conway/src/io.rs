// io.rs - Boundary to the grid source / snapshot sink

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::error::IoError;

/// Where initial boards come from and where snapshots go.
///
/// Cells are row-major bytes, 0 (dead) or 255 (alive).
pub trait GridIo: Send + Sync + 'static {
    fn read_image(
        &self,
        name: &str,
        width: usize,
        height: usize,
    ) -> impl Future<Output = Result<Vec<u8>, IoError>> + Send;

    /// Queues a full board for output. Completion is only guaranteed once
    /// [`GridIo::check_idle`] returns.
    fn write_image(
        &self,
        name: &str,
        width: usize,
        height: usize,
        cells: Vec<u8>,
    ) -> impl Future<Output = Result<(), IoError>> + Send;

    /// Waits until every previously queued write has been flushed.
    fn check_idle(&self) -> impl Future<Output = Result<(), IoError>> + Send;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<u8>,
}

enum IoCommand {
    Input { name: String, reply: oneshot::Sender<Option<Image>> },
    Output { name: String, image: Image },
    CheckIdle { reply: oneshot::Sender<()> },
}

type Images = Arc<Mutex<HashMap<String, Image>>>;

/// In-memory [`GridIo`]. A background task handles commands strictly in order,
/// so an idle reply means every earlier write is visible through [`ImageStore::image`].
#[derive(Clone)]
pub struct ImageStore {
    commands: mpsc::UnboundedSender<IoCommand>,
    images: Images,
}

impl ImageStore {
    /// Starts the store's task on the current tokio runtime.
    pub fn spawn() -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let images = Images::default();
        tokio::spawn(serve(rx, Arc::clone(&images)));
        Self { commands, images }
    }

    /// Seeds an image, bypassing the command queue.
    pub fn insert(&self, name: impl Into<String>, image: Image) {
        lock(&self.images).insert(name.into(), image);
    }

    pub fn image(&self, name: &str) -> Option<Image> {
        lock(&self.images).get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = lock(&self.images).keys().cloned().collect();
        names.sort();
        names
    }

    fn send(&self, command: IoCommand) -> Result<(), IoError> {
        self.commands.send(command).map_err(|_| IoError::Disconnected)
    }
}

impl GridIo for ImageStore {
    async fn read_image(&self, name: &str, width: usize, height: usize) -> Result<Vec<u8>, IoError> {
        let (reply, rx) = oneshot::channel();
        self.send(IoCommand::Input { name: name.to_owned(), reply })?;
        let image = rx
            .await
            .map_err(|_| IoError::Disconnected)?
            .ok_or_else(|| IoError::NotFound(name.to_owned()))?;

        if (image.width, image.height) != (width, height) {
            return Err(IoError::DimensionMismatch {
                expected: (width, height),
                actual: (image.width, image.height),
            });
        }
        let expected = width * height;
        if image.cells.len() != expected {
            return Err(IoError::ShortRead { expected, actual: image.cells.len() });
        }
        Ok(image.cells)
    }

    async fn write_image(&self, name: &str, width: usize, height: usize, cells: Vec<u8>) -> Result<(), IoError> {
        let image = Image { width, height, cells };
        self.send(IoCommand::Output { name: name.to_owned(), image })
    }

    async fn check_idle(&self) -> Result<(), IoError> {
        let (reply, rx) = oneshot::channel();
        self.send(IoCommand::CheckIdle { reply })?;
        rx.await.map_err(|_| IoError::Disconnected)
    }
}

async fn serve(mut commands: mpsc::UnboundedReceiver<IoCommand>, images: Images) {
    while let Some(command) = commands.recv().await {
        match command {
            IoCommand::Input { name, reply } => {
                let image = lock(&images).get(&name).cloned();
                let _ = reply.send(image);
            }
            IoCommand::Output { name, image } => {
                debug!(%name, width = image.width, height = image.height, "image written");
                lock(&images).insert(name, image);
            }
            IoCommand::CheckIdle { reply } => {
                let _ = reply.send(());
            }
        }
    }
}

fn lock(images: &Images) -> std::sync::MutexGuard<'_, HashMap<String, Image>> {
    images.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_is_visible_after_idle() {
        let store = ImageStore::spawn();
        store.write_image("4x1x0", 4, 1, vec![0, 255, 0, 255]).await.unwrap();
        store.check_idle().await.unwrap();

        let image = store.image("4x1x0").unwrap();
        assert_eq!(image.cells, vec![0, 255, 0, 255]);
    }

    #[tokio::test]
    async fn missing_image_is_not_found() {
        let store = ImageStore::spawn();
        let err = store.read_image("2x2", 2, 2).await.unwrap_err();
        assert!(matches!(err, IoError::NotFound(name) if name == "2x2"));
    }

    #[tokio::test]
    async fn wrong_size_is_short_read() {
        let store = ImageStore::spawn();
        store.insert("3x3", Image { width: 3, height: 3, cells: vec![0; 5] });
        let err = store.read_image("3x3", 3, 3).await.unwrap_err();
        assert!(matches!(err, IoError::ShortRead { expected: 9, actual: 5 }));
    }

    #[tokio::test]
    async fn other_dimensions_are_rejected_even_with_same_cell_count() {
        let store = ImageStore::spawn();
        store.insert("4x4", Image { width: 2, height: 8, cells: vec![0; 16] });
        let err = store.read_image("4x4", 4, 4).await.unwrap_err();
        assert!(matches!(err, IoError::DimensionMismatch { expected: (4, 4), actual: (2, 8) }));
    }
}
