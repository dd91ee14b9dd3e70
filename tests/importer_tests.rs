//! End-to-end import pipeline tests against in-memory ports

mod common;

use common::{FakeBucket, FakeFetcher, asset, asset_link, content_type, entry, field, locale, post_export};
use contentful_cosmic_importer::import::labels;
use contentful_cosmic_importer::{
    CollectingObserver, ContentfulExport, CosmicError, ImportError, ImportStage, Importer,
    MetafieldKind, MetafieldValue, ValidationError,
};
use serde_json::{Value, json};

const COVER_URL: &str = "https://images.example.com/hello.png";

fn export(value: Value) -> ContentfulExport {
    ContentfulExport::from_json_str(&value.to_string()).unwrap()
}

fn serving_cover() -> FakeFetcher {
    FakeFetcher::new().serve(COVER_URL, b"\x89PNG", Some("image/png"))
}

mod scenario_tests {
    use super::*;

    #[tokio::test]
    async fn test_post_import() {
        let observer = CollectingObserver::new();
        let mut importer = Importer::new(FakeBucket::new(), serving_cover());

        let report = importer
            .run(&export(post_export()), &observer)
            .await
            .unwrap();

        assert_eq!(importer.stage(), ImportStage::Complete);
        assert_eq!(report.object_types_created, 1);
        assert_eq!(report.media_uploaded, 1);
        assert_eq!(report.objects_created, 1);
        assert!(report.messages.is_empty());

        let types = importer.bucket().created_types();
        assert_eq!(types[0].slug, "post");
        assert_eq!(types[0].title, "Posts");

        let objects = importer.bucket().created_objects();
        assert_eq!(objects.len(), 1);
        let post = &objects[0];
        assert_eq!(post.slug, "hello-post");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.locale, "en");
        assert_eq!(post.type_slug, "post");

        let title = post.metafield("title").unwrap();
        assert_eq!(title.kind, Some(MetafieldKind::Text));
        assert_eq!(title.value, Some(MetafieldValue::Json(json!("Hello"))));

        let body = post.metafield("body").unwrap();
        assert_eq!(body.kind, Some(MetafieldKind::HtmlTextarea));
        assert_eq!(body.value, Some(MetafieldValue::Text("<p>First post</p>".to_string())));

        let cover = post.metafield("cover").unwrap();
        assert_eq!(cover.kind, Some(MetafieldKind::File));
        assert_eq!(cover.value, Some(MetafieldValue::Text("hello.png".to_string())));
    }

    #[tokio::test]
    async fn test_uploaded_media_carries_metadata() {
        let observer = CollectingObserver::new();
        let mut importer = Importer::new(FakeBucket::new(), serving_cover());

        let _ = importer.run(&export(post_export()), &observer).await.unwrap();

        let media = importer.bucket().uploaded_media();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].content_type, "image/png");
        assert_eq!(media[0].metadata.contentful_id, "cover-asset");
        assert_eq!(media[0].metadata.locale, "en");
        assert_eq!(media[0].metadata.original_url, COVER_URL);
    }

    #[tokio::test]
    async fn test_progress_labels_in_order() {
        let observer = CollectingObserver::new();
        let mut importer = Importer::new(FakeBucket::new(), serving_cover());

        let _ = importer.run(&export(post_export()), &observer).await.unwrap();

        assert_eq!(observer.progress(), labels::ALL.map(str::to_string).to_vec());
        assert!(observer.messages().is_empty());
    }

    #[tokio::test]
    async fn test_run_json_accepts_document_text() {
        let observer = CollectingObserver::new();
        let mut importer = Importer::new(FakeBucket::new(), serving_cover());

        let report = importer
            .run_json(&post_export().to_string(), &observer)
            .await
            .unwrap();

        assert_eq!(report.objects_created, 1);
        assert_eq!(importer.stage(), ImportStage::Complete);
    }

    #[tokio::test]
    async fn test_every_locale_gets_an_object() {
        let mut doc = post_export();
        doc["locales"] = json!([locale("en"), locale("de")]);

        let observer = CollectingObserver::new();
        let mut importer = Importer::new(FakeBucket::new(), serving_cover());
        let report = importer.run(&export(doc), &observer).await.unwrap();

        assert_eq!(report.objects_created, 2);
        let objects = importer.bucket().created_objects();
        let de = objects.iter().find(|o| o.locale == "de").unwrap();
        // No German file; cover has nothing to resolve to.
        assert!(de.metafield("cover").is_none());
        assert_eq!(de.title, "Hello");
    }
}

mod media_fault_tests {
    use super::*;

    #[tokio::test]
    async fn test_download_failure_is_reported() {
        let observer = CollectingObserver::new();
        let mut importer = Importer::new(FakeBucket::new(), FakeFetcher::new());

        let report = importer
            .run(&export(post_export()), &observer)
            .await
            .unwrap();

        assert_eq!(importer.stage(), ImportStage::Complete);
        assert_eq!(report.media_uploaded, 0);
        assert_eq!(report.media_failed, 1);
        assert_eq!(
            report.messages,
            vec!["Failed to download image from contentful: hello.png".to_string()]
        );
        assert_eq!(observer.messages(), report.messages);

        let objects = importer.bucket().created_objects();
        assert!(objects[0].metafield("cover").is_none());
    }

    #[tokio::test]
    async fn test_upload_rejection_is_reported() {
        let observer = CollectingObserver::new();
        let bucket = FakeBucket::new().rejecting_media("hello.png");
        let mut importer = Importer::new(bucket, serving_cover());

        let report = importer
            .run(&export(post_export()), &observer)
            .await
            .unwrap();

        assert_eq!(report.media_failed, 1);
        assert_eq!(
            report.messages,
            vec![format!("Failed to upload image: Cover - {}", COVER_URL)]
        );
        assert_eq!(report.objects_created, 1);
    }

    #[tokio::test]
    async fn test_partial_media_failure_keeps_going() {
        let mut doc = post_export();
        doc["assets"]
            .as_array_mut()
            .unwrap()
            .push(asset("extra", "en", "Extra", "https://images.example.com/extra.png", "extra.png"));

        let observer = CollectingObserver::new();
        let mut importer = Importer::new(FakeBucket::new(), serving_cover());
        let report = importer.run(&export(doc), &observer).await.unwrap();

        assert_eq!(report.media_uploaded, 1);
        assert_eq!(report.media_failed, 1);
        assert_eq!(importer.bucket().uploaded_media()[0].filename, "hello.png");
    }
}

mod creation_fault_tests {
    use super::*;

    #[tokio::test]
    async fn test_existing_type_and_object_are_tolerated() {
        let observer = CollectingObserver::new();
        let bucket = FakeBucket::new()
            .with_existing_type("post")
            .with_existing_object("hello-post");
        let mut importer = Importer::new(bucket, serving_cover());

        let report = importer
            .run(&export(post_export()), &observer)
            .await
            .unwrap();

        assert_eq!(importer.stage(), ImportStage::Complete);
        assert_eq!(report.object_types_created, 0);
        assert_eq!(report.object_types_existing, 1);
        assert_eq!(report.objects_created, 0);
        assert_eq!(report.objects_existing, 1);
        assert!(report.messages.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_object_is_reported_and_others_created() {
        let doc = json!({
            "contentTypes": [content_type("note", "Note", "title", vec![
                field("title", "Title", "Symbol", None),
            ])],
            "entries": [
                entry("first", "note", json!({"title": {"en": "First"}})),
                entry("bad", "note", json!({"title": {"en": "Bad"}})),
                entry("last", "note", json!({"title": {"en": "Last"}})),
            ],
            "locales": [locale("en")]
        });

        let observer = CollectingObserver::new();
        let bucket = FakeBucket::new().rejecting_object("bad");
        let mut importer = Importer::new(bucket, FakeFetcher::new());
        let report = importer.run(&export(doc), &observer).await.unwrap();

        assert_eq!(report.objects_created, 2);
        assert_eq!(
            report.messages,
            vec!["Failed to create object bad (en): Rejected (422): metafield value invalid".to_string()]
        );
        let slugs: Vec<String> = importer
            .bucket()
            .created_objects()
            .into_iter()
            .map(|o| o.slug)
            .collect();
        assert_eq!(slugs, vec!["first".to_string(), "last".to_string()]);
    }

    #[tokio::test]
    async fn test_server_fault_on_object_aborts() {
        let observer = CollectingObserver::new();
        let bucket = FakeBucket::new().failing_object("hello-post");
        let mut importer = Importer::new(bucket, serving_cover());

        let err = importer
            .run(&export(post_export()), &observer)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ImportError::Cosmic(CosmicError::Transport("HTTP 500: internal error".to_string()))
        );
        assert_eq!(importer.stage(), ImportStage::Failed);
        assert!(!observer.progress().contains(&labels::CREATED_OBJECTS.to_string()));
    }

    #[tokio::test]
    async fn test_transport_fault_on_type_stops_before_media() {
        let observer = CollectingObserver::new();
        let bucket = FakeBucket::new().failing_type("post");
        let mut importer = Importer::new(bucket, serving_cover());

        let err = importer
            .run(&export(post_export()), &observer)
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::Cosmic(CosmicError::Transport(_))));
        assert_eq!(importer.stage(), ImportStage::Failed);
        assert!(importer.bucket().uploaded_media().is_empty());
        assert!(importer.bucket().created_objects().is_empty());
        assert_eq!(
            observer.progress(),
            vec![
                labels::CONTENT_VALID.to_string(),
                labels::PARSED_CONTENT_TYPES.to_string()
            ]
        );
    }
}

mod input_fault_tests {
    use super::*;

    #[tokio::test]
    async fn test_null_assets_import_without_media() {
        let mut doc = post_export();
        doc["assets"] = Value::Null;

        let observer = CollectingObserver::new();
        let mut importer = Importer::new(FakeBucket::new(), serving_cover());
        let report = importer
            .run_json(&doc.to_string(), &observer)
            .await
            .unwrap();

        assert_eq!(importer.stage(), ImportStage::Complete);
        assert_eq!(report.media_uploaded, 0);
        assert_eq!(report.objects_created, 1);
        let objects = importer.bucket().created_objects();
        assert!(objects[0].metafield("cover").is_none());
    }

    #[tokio::test]
    async fn test_missing_collection_is_invalid_content() {
        let observer = CollectingObserver::new();
        let mut importer = Importer::new(FakeBucket::new(), FakeFetcher::new());

        let doc = json!({"contentTypes": [], "entries": []});
        let err = importer
            .run_json(&doc.to_string(), &observer)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ImportError::InvalidContent(ValidationError::MissingCollection("locales"))
        );
        assert_eq!(importer.stage(), ImportStage::Failed);
        assert!(observer.progress().is_empty());
        assert!(importer.bucket().created_types().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_fails_before_any_write() {
        let observer = CollectingObserver::new();
        let mut importer = Importer::new(FakeBucket::new(), FakeFetcher::new());

        let err = importer.run_json("{not json", &observer).await.unwrap_err();

        assert!(matches!(err, ImportError::ParseError(_)));
        assert_eq!(importer.stage(), ImportStage::Failed);
    }

    #[tokio::test]
    async fn test_unmapped_entry_fails_after_media() {
        let mut doc = post_export();
        doc["entries"]
            .as_array_mut()
            .unwrap()
            .push(entry("stray", "video", json!({"cover": {"en": asset_link("cover-asset")}})));

        let observer = CollectingObserver::new();
        let mut importer = Importer::new(FakeBucket::new(), serving_cover());
        let err = importer.run(&export(doc), &observer).await.unwrap_err();

        assert!(matches!(err, ImportError::Conversion(_)));
        assert_eq!(importer.stage(), ImportStage::Failed);
        assert_eq!(importer.bucket().uploaded_media().len(), 1);
        assert!(importer.bucket().created_objects().is_empty());
    }
}
