/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Concurrent upload of local files into one album.
//!
//! A run moves files through three stages joined by bounded channels:
//!
//! 1. discovery walks the roots and emits every file path,
//! 2. a filter reads and hashes each file and drops the ones the album
//!    already holds,
//! 3. a fixed pool of workers sends the rest, one request each at a time.
//!
//! The album's catalog is listed once before any stage starts. The first error
//! from any stage, a deadline expiry, or a cancellation stops all stages and
//! is the one error reported. Successful uploads are delivered as they finish.

use crate::v2::errors::SmugMugError;
use crate::v2::filesystem::{Filesystem, LocalFilesystem};
use crate::v2::uploadable::UploadFilter;
use crate::v2::{Catalog, Client, UploadResult, Uploadable};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Number of uploads in flight unless configured otherwise
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Extensions uploaded unless configured otherwise
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".jpg", ".jpeg"];

/// Settings for one upload run
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub(crate) album_key: String,
    pub(crate) concurrency: usize,
    pub(crate) extensions: Vec<String>,
    pub(crate) skip_matching: bool,
    pub(crate) replace_existing: bool,
    pub(crate) queue_capacity: Option<usize>,
    pub(crate) deadline: Option<Duration>,
    pub(crate) cancellation: Option<CancellationToken>,
}

impl UploadConfig {
    pub fn new(album_key: &str) -> Self {
        Self {
            album_key: album_key.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            skip_matching: true,
            replace_existing: true,
            queue_capacity: None,
            deadline: None,
            cancellation: None,
        }
    }

    /// Starts from [`UploadConfig::new`] and applies `SMUGMUG_UPLOAD_CONCURRENCY`
    /// and `SMUGMUG_UPLOAD_EXTENSIONS` (comma separated) when they are set
    pub fn from_env(album_key: &str) -> Self {
        let mut config = Self::new(album_key);
        if let Some(concurrency) = std::env::var("SMUGMUG_UPLOAD_CONCURRENCY")
            .ok()
            .and_then(|value| value.trim().parse::<usize>().ok())
        {
            config = config.with_concurrency(concurrency);
        }
        if let Ok(value) = std::env::var("SMUGMUG_UPLOAD_EXTENSIONS") {
            let extensions: Vec<&str> = value
                .split(',')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .collect();
            if !extensions.is_empty() {
                config = config.with_extensions(&extensions);
            }
        }
        config
    }

    /// Number of workers, at least one
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// File extensions to upload, matched case-insensitively. A leading dot is optional.
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|ext| {
                let ext = ext.to_lowercase();
                if ext.starts_with('.') { ext } else { format!(".{}", ext) }
            })
            .collect();
        self
    }

    /// Skip files whose name and content hash match an image already in the album
    pub fn with_skip_matching(mut self, skip: bool) -> Self {
        self.skip_matching = skip;
        self
    }

    /// Replace images whose name matches but content differs
    pub fn with_replace_existing(mut self, replace: bool) -> Self {
        self.replace_existing = replace;
        self
    }

    /// Capacity of the queues between stages, defaults to the concurrency
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity.max(1));
        self
    }

    /// Time limit for the whole run, catalog listing included
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stops the run when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn album_key(&self) -> &str {
        &self.album_key
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    fn capacity(&self) -> usize {
        self.queue_capacity.unwrap_or(self.concurrency).max(1)
    }
}

/// A running upload.
///
/// Results arrive through [`Uploads::next`]. Once they stop, [`Uploads::error`]
/// tells whether the run ended early and why.
#[derive(Debug)]
pub struct Uploads {
    results: mpsc::Receiver<UploadResult>,
    error: oneshot::Receiver<SmugMugError>,
    cancel: CancellationToken,
}

impl Uploads {
    /// Next finished upload, `None` once the run is over
    pub async fn next(&mut self) -> Option<UploadResult> {
        self.results.recv().await
    }

    /// Waits for the run to end and returns the error that stopped it, if any.
    ///
    /// Results not yet received are discarded as they arrive.
    pub async fn error(mut self) -> Option<SmugMugError> {
        while self.results.recv().await.is_some() {}
        self.error.await.ok()
    }

    /// Receives every result, then the error that stopped the run, if any
    pub async fn collect(mut self) -> (Vec<UploadResult>, Option<SmugMugError>) {
        let mut done = Vec::new();
        while let Some(result) = self.results.recv().await {
            done.push(result);
        }
        (done, self.error.await.ok())
    }

    /// Stops the run. Uploads already being sent are allowed to finish.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The raw result and error channels.
    ///
    /// Dropping the results receiver does not stop the run; use
    /// [`Uploads::cancellation_token`] for that.
    pub fn into_channels(
        self,
    ) -> (
        mpsc::Receiver<UploadResult>,
        oneshot::Receiver<SmugMugError>,
    ) {
        (self.results, self.error)
    }
}

// Forwards the first error to the caller and stops everything else
struct FirstError {
    slot: Option<oneshot::Sender<SmugMugError>>,
    cancel: CancellationToken,
}

impl FirstError {
    fn new(slot: oneshot::Sender<SmugMugError>, cancel: CancellationToken) -> Self {
        Self {
            slot: Some(slot),
            cancel,
        }
    }

    fn is_set(&self) -> bool {
        self.slot.is_none()
    }

    fn fail(&mut self, err: SmugMugError) {
        match self.slot.take() {
            Some(slot) => {
                error!("upload stopped: {}", err);
                let _ = slot.send(err);
            }
            None if err.is_cancellation() => debug!("already stopped: {}", err),
            None => warn!("dropping error after the first: {}", err),
        }
        self.cancel.cancel();
    }
}

impl Client {
    /// Uploads every wanted file below `roots` from the local disk
    pub async fn uploads_from_disk(&self, config: UploadConfig, roots: Vec<PathBuf>) -> Uploads {
        self.uploads(config, Arc::new(LocalFilesystem), roots).await
    }

    /// Starts uploading every wanted file below `roots` into `config`'s album.
    ///
    /// Returns once the album catalog has been listed and the stages are
    /// running. A missing album key or a failed catalog listing is reported
    /// through [`Uploads::error`] with no results.
    pub async fn uploads(
        &self,
        config: UploadConfig,
        filesystem: Arc<dyn Filesystem>,
        roots: Vec<PathBuf>,
    ) -> Uploads {
        let cancel = config
            .cancellation
            .as_ref()
            .map(CancellationToken::child_token)
            .unwrap_or_default();
        let deadline = config.deadline.map(|limit| Instant::now() + limit);
        let (error_tx, error_rx) = oneshot::channel();
        let (results_tx, results_rx) = mpsc::channel(config.capacity());
        let uploads = Uploads {
            results: results_rx,
            error: error_rx,
            cancel: cancel.clone(),
        };
        let mut first = FirstError::new(error_tx, cancel.clone());

        if config.album_key.is_empty() {
            first.fail(SmugMugError::MissingAlbumKey());
            return uploads;
        }

        let catalog = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SmugMugError::Cancelled()),
            _ = expiry(deadline) => Err(SmugMugError::DeadlineExceeded()),
            catalog = Catalog::from_album(self, &config.album_key) => catalog,
        };
        let catalog = match catalog {
            Ok(catalog) => Arc::new(catalog),
            Err(err) => {
                first.fail(err);
                return uploads;
            }
        };
        info!(
            "album {} already holds {} images",
            config.album_key,
            catalog.len()
        );

        let filter = UploadFilter::new(&config, catalog);
        let (paths_tx, paths_rx) = mpsc::channel::<PathBuf>(config.capacity());
        let (queue_tx, queue_rx) = mpsc::channel::<Uploadable>(config.capacity());
        let queue_rx = Arc::new(Mutex::new(queue_rx));

        let mut tasks = JoinSet::new();
        {
            let filesystem = filesystem.clone();
            let cancel = cancel.clone();
            tasks.spawn_blocking(move || discover(filesystem.as_ref(), &roots, &paths_tx, &cancel));
        }
        tasks.spawn(filter_files(
            filter,
            filesystem,
            paths_rx,
            queue_tx,
            cancel.clone(),
        ));
        for worker in 0..config.concurrency {
            tasks.spawn(upload_files(
                worker,
                self.clone(),
                queue_rx.clone(),
                results_tx.clone(),
                cancel.clone(),
            ));
        }
        drop(results_tx);

        tokio::spawn(supervise(tasks, first, cancel, deadline));
        uploads
    }
}

// Resolves at the deadline, never when there is none
async fn expiry(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

// Waits for every stage, turning the first failure, expiry or cancellation into the run's error
async fn supervise(
    mut tasks: JoinSet<Result<(), SmugMugError>>,
    mut first: FirstError,
    cancel: CancellationToken,
    deadline: Option<Instant>,
) {
    let expired = expiry(deadline);
    tokio::pin!(expired);
    let mut stopping = false;

    loop {
        tokio::select! {
            biased;
            joined = tasks.join_next() => match joined {
                None => break,
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(err))) => first.fail(err),
                Some(Err(err)) => first.fail(SmugMugError::TaskFailed(err.to_string())),
            },
            _ = &mut expired, if !stopping => {
                stopping = true;
                first.fail(SmugMugError::DeadlineExceeded());
            }
            _ = cancel.cancelled(), if !stopping => {
                stopping = true;
                first.fail(SmugMugError::Cancelled());
            }
        }
    }

    if cancel.is_cancelled() && !first.is_set() {
        first.fail(SmugMugError::Cancelled());
    }
    debug!("upload run finished");
}

// Emits every file below the roots. Runs on a blocking thread.
fn discover(
    filesystem: &dyn Filesystem,
    roots: &[PathBuf],
    paths: &mpsc::Sender<PathBuf>,
    cancel: &CancellationToken,
) -> Result<(), SmugMugError> {
    let mut found = 0usize;
    for root in roots {
        for path in filesystem.walk(root) {
            if cancel.is_cancelled() {
                return Ok(());
            }
            let path = path?;
            debug!("found {}", path.display());
            if paths.blocking_send(path).is_err() {
                // Filter stage is gone
                return Ok(());
            }
            found += 1;
        }
    }
    info!("found {} files below {} roots", found, roots.len());
    Ok(())
}

async fn filter_files(
    filter: UploadFilter,
    filesystem: Arc<dyn Filesystem>,
    mut paths: mpsc::Receiver<PathBuf>,
    queue: mpsc::Sender<Uploadable>,
    cancel: CancellationToken,
) -> Result<(), SmugMugError> {
    let filter = Arc::new(filter);
    loop {
        let path = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(()),
            path = paths.recv() => path,
        };
        let Some(path) = path else {
            return Ok(());
        };

        // Reading and hashing block
        let uploadable = {
            let filter = filter.clone();
            let filesystem = filesystem.clone();
            tokio::task::spawn_blocking(move || filter.uploadable(filesystem.as_ref(), &path))
                .await
                .map_err(|err| SmugMugError::TaskFailed(err.to_string()))??
        };
        let Some(uploadable) = uploadable else {
            continue;
        };

        debug!("queueing {}", uploadable.name);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(()),
            sent = queue.send(uploadable) => {
                if sent.is_err() {
                    return Ok(());
                }
            }
        }
    }
}

async fn upload_files(
    worker: usize,
    client: Client,
    queue: Arc<Mutex<mpsc::Receiver<Uploadable>>>,
    results: mpsc::Sender<UploadResult>,
    cancel: CancellationToken,
) -> Result<(), SmugMugError> {
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(()),
            next = async { queue.lock().await.recv().await } => next,
        };
        let Some(uploadable) = next else {
            debug!("worker {} done", worker);
            return Ok(());
        };
        if cancel.is_cancelled() {
            return Ok(());
        }

        info!(
            "worker {} sending {} ({} bytes) to album {}",
            worker, uploadable.name, uploadable.size, uploadable.album_key
        );
        let result = client.upload(uploadable).await?;
        info!(
            "uploaded {} as {} in {:?}",
            result.uploadable.name, result.image_uri, result.elapsed
        );

        // Finished uploads are still reported once stopping if there is room
        tokio::select! {
            biased;
            sent = results.send(result) => {
                if let Err(mpsc::error::SendError(result)) = sent {
                    debug!("nobody is listening for {}", result.uploadable.name);
                }
            }
            _ = cancel.cancelled() => return Ok(()),
        }
    }
}
