//! Import pipeline
//!
//! Runs the stages strictly in order: object types, media, objects. Within a
//! stage every write is dispatched at once and the stage ends when all of
//! them have settled.

use super::observer::ImportObserver;
use super::{ImportError, ImportReport, ImportStage, labels};
use crate::convert::{EntryTransformer, map_content_types};
use crate::cosmic::{CosmicBucket, CosmicError};
use crate::media::{AssetFetcher, MediaItem, transcode_assets};
use crate::models::{ContentfulExport, CosmicObject, MediaUpload, ObjectType, UploadedMedia};
use futures::future::join_all;
use tracing::{debug, error, info};

/// What a settled create call means for the run.
enum Settled {
    Created,
    Existing,
    Skipped(String),
}

/// Duplicates count as done; item rejections are reported; anything else aborts.
fn settle(
    result: Result<(), CosmicError>,
    describe: impl FnOnce() -> String,
) -> Result<Settled, ImportError> {
    match result {
        Ok(()) => Ok(Settled::Created),
        Err(e) if e.is_duplicate() => {
            debug!("{} already exists", describe());
            Ok(Settled::Existing)
        }
        Err(e) if e.is_item_fault() => Ok(Settled::Skipped(format!(
            "Failed to create {}: {}",
            describe(),
            e
        ))),
        Err(e) => Err(ImportError::Cosmic(e)),
    }
}

/// Imports a Contentful export into a Cosmic bucket.
pub struct Importer<B: CosmicBucket, F: AssetFetcher> {
    bucket: B,
    fetcher: F,
    stage: ImportStage,
}

impl<B: CosmicBucket, F: AssetFetcher> Importer<B, F> {
    pub fn new(bucket: B, fetcher: F) -> Self {
        Self {
            bucket,
            fetcher,
            stage: ImportStage::Idle,
        }
    }

    /// Current pipeline stage.
    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    pub fn bucket(&self) -> &B {
        &self.bucket
    }

    /// Parse, validate and import an export document.
    pub async fn run_json(
        &mut self,
        content: &str,
        observer: &dyn ImportObserver,
    ) -> Result<ImportReport, ImportError> {
        self.stage = ImportStage::ValidatingInput;
        match ContentfulExport::from_json_str(content).map_err(ImportError::from) {
            Ok(export) => self.run(&export, observer).await,
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Import an already parsed export.
    pub async fn run(
        &mut self,
        export: &ContentfulExport,
        observer: &dyn ImportObserver,
    ) -> Result<ImportReport, ImportError> {
        let result = self.execute(export, observer).await;
        if let Err(e) = &result {
            self.fail(e);
        }
        result
    }

    fn fail(&mut self, e: &ImportError) {
        error!("Import failed while {}: {}", self.stage, e);
        self.stage = ImportStage::Failed;
    }

    async fn execute(
        &mut self,
        export: &ContentfulExport,
        observer: &dyn ImportObserver,
    ) -> Result<ImportReport, ImportError> {
        let mut report = ImportReport::default();

        self.stage = ImportStage::ValidatingInput;
        observer.on_progress(labels::CONTENT_VALID);

        let mapping = map_content_types(&export.content_types);
        observer.on_progress(labels::PARSED_CONTENT_TYPES);

        self.create_object_types(&mapping.object_types, observer, &mut report)
            .await?;
        self.stage = ImportStage::TypesCreated;
        observer.on_progress(labels::CREATED_CONTENT_TYPES);

        let items = transcode_assets(&self.fetcher, &export.assets, &export.locales).await;
        let mut uploads = Vec::with_capacity(items.len());
        for item in items {
            match item {
                MediaItem::Ready(upload) => uploads.push(upload),
                MediaItem::Failed { title } => {
                    report.media_failed += 1;
                    emit(
                        observer,
                        &mut report,
                        format!("Failed to download image from contentful: {}", title),
                    );
                }
            }
        }
        self.stage = ImportStage::MediaTranscoded;
        observer.on_progress(labels::PARSED_MEDIA);

        observer.on_progress(labels::UPLOADING_MEDIA);
        let media = self.upload_media(&uploads, observer, &mut report).await;
        self.stage = ImportStage::MediaUploaded;
        observer.on_progress(labels::CREATED_MEDIA);

        let objects = EntryTransformer::from_mapping(&mapping, &media)
            .transform(&export.entries, &export.locales)?;
        self.stage = ImportStage::ObjectsTransformed;
        observer.on_progress(labels::PARSED_ENTRIES);

        self.create_objects(&objects, observer, &mut report).await?;
        self.stage = ImportStage::ObjectsCreated;
        observer.on_progress(labels::CREATED_OBJECTS);

        self.stage = ImportStage::Complete;
        info!(
            "Import complete: {} object types, {} media, {} objects, {} messages",
            report.object_types_created,
            report.media_uploaded,
            report.objects_created,
            report.messages.len()
        );

        Ok(report)
    }

    async fn create_object_types(
        &self,
        object_types: &[ObjectType],
        observer: &dyn ImportObserver,
        report: &mut ImportReport,
    ) -> Result<(), ImportError> {
        let results = join_all(
            object_types
                .iter()
                .map(|object_type| self.bucket.create_object_type(object_type)),
        )
        .await;

        for (object_type, result) in object_types.iter().zip(results) {
            match settle(result, || format!("object type {}", object_type.slug))? {
                Settled::Created => report.object_types_created += 1,
                Settled::Existing => report.object_types_existing += 1,
                Settled::Skipped(message) => emit(observer, report, message),
            }
        }

        info!(
            "Created {} object types ({} already existed)",
            report.object_types_created, report.object_types_existing
        );
        Ok(())
    }

    /// Upload media; every failure is reported and dropped.
    async fn upload_media(
        &self,
        uploads: &[MediaUpload],
        observer: &dyn ImportObserver,
        report: &mut ImportReport,
    ) -> Vec<UploadedMedia> {
        let results = join_all(uploads.iter().map(|upload| self.bucket.upload_media(upload))).await;

        let mut uploaded = Vec::with_capacity(uploads.len());
        for (upload, result) in uploads.iter().zip(results) {
            match result {
                Ok(media) => uploaded.push(media),
                Err(e) => {
                    debug!("Upload of {} failed: {}", upload.filename, e);
                    report.media_failed += 1;
                    emit(
                        observer,
                        report,
                        format!(
                            "Failed to upload image: {} - {}",
                            upload.metadata.title, upload.metadata.original_url
                        ),
                    );
                }
            }
        }

        report.media_uploaded = uploaded.len();
        info!("Uploaded {} of {} media items", uploaded.len(), uploads.len());
        uploaded
    }

    async fn create_objects(
        &self,
        objects: &[CosmicObject],
        observer: &dyn ImportObserver,
        report: &mut ImportReport,
    ) -> Result<(), ImportError> {
        let results = join_all(objects.iter().map(|object| self.bucket.create_object(object))).await;

        for (object, result) in objects.iter().zip(results) {
            match settle(result, || format!("object {} ({})", object.slug, object.locale))? {
                Settled::Created => report.objects_created += 1,
                Settled::Existing => report.objects_existing += 1,
                Settled::Skipped(message) => emit(observer, report, message),
            }
        }

        info!(
            "Created {} objects ({} already existed)",
            report.objects_created, report.objects_existing
        );
        Ok(())
    }
}

fn emit(observer: &dyn ImportObserver, report: &mut ImportReport, message: String) {
    observer.on_message(&message);
    report.messages.push(message);
}
