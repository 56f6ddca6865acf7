mod common;

#[cfg(test)]
mod multipart_parser_tests {
    use actix_multipart::Multipart;
    use actix_web::error::PayloadError;
    use actix_web::http::header::{self, HeaderMap, HeaderValue};
    use actix_web::web::Bytes;
    use image::ImageFormat;

    use service_report_server::form::models::ActivityFormat;
    use service_report_server::form::multipart_parser::{
        MultipartParseError, MultipartParser, ParsedActivityForm, UploadLimits,
    };

    use super::common::{multipart_body, multipart_content_type, photo_bytes, Part};

    fn multipart(parts: Vec<Part<'_>>) -> Multipart {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&multipart_content_type()).unwrap(),
        );
        let body = Bytes::from(multipart_body(parts));
        Multipart::new(
            &headers,
            futures::stream::once(async move { Ok::<_, PayloadError>(body) }),
        )
    }

    async fn parse(payload: Multipart) -> Result<ParsedActivityForm, MultipartParseError> {
        MultipartParser::parse_activity_multipart(payload, UploadLimits::new(1 << 20, 4 << 20)).await
    }

    const OBSERVATION_ONLY: &str =
        r#"{"title":"Weed Clearing","format":"observation_only","observation":"Done"}"#;

    fn metadata(json: &str) -> Part<'static> {
        Part::Text {
            name: "metadata",
            value: json.to_string(),
        }
    }

    fn file<'a>(name: &'a str, filename: &'a str, bytes: Vec<u8>) -> Part<'a> {
        Part::File {
            name,
            filename,
            content_type: "image/png",
            bytes,
        }
    }

    #[actix_web::test]
    async fn test_parses_metadata_and_routes_photos() {
        let png = photo_bytes(8, 8, ImageFormat::Png);
        let parsed = parse(multipart(vec![
            metadata(
                r#"{"title":"Pipe Cleaning","format":"before_after","before_observation":"Clogged","after_observation":"Clear"}"#,
            ),
            file("before_images", "before.png", png.clone()),
            file("after_images", "after-1.png", png.clone()),
            file("after_images", "after-2.png", png),
            Part::Text {
                name: "ignored",
                value: "x".into(),
            },
        ]))
        .await
        .unwrap();

        assert_eq!(parsed.metadata.title, "Pipe Cleaning");
        assert_eq!(parsed.metadata.format, ActivityFormat::BeforeAfter);
        assert!(parsed.images.is_empty());
        assert_eq!(parsed.before_images.len(), 1);
        assert_eq!(parsed.before_images[0].filename, "before.png");
        let after: Vec<&str> = parsed
            .after_images
            .iter()
            .map(|i| i.filename.as_str())
            .collect();
        assert_eq!(after, vec!["after-1.png", "after-2.png"]);
    }

    #[actix_web::test]
    async fn test_empty_file_part_is_skipped() {
        let parsed = parse(multipart(vec![
            metadata(r#"{"title":"Weed Clearing","format":"observation_only","observation":"Done"}"#),
            Part::File {
                name: "images",
                filename: "",
                content_type: "application/octet-stream",
                bytes: Vec::new(),
            },
        ]))
        .await
        .unwrap();

        assert!(parsed.images.is_empty());
    }

    #[actix_web::test]
    async fn test_missing_metadata_is_rejected() {
        let err = parse(multipart(vec![file(
            "images",
            "a.png",
            photo_bytes(4, 4, ImageFormat::Png),
        )]))
        .await
        .unwrap_err();

        assert!(matches!(err, MultipartParseError::MetadataError(_)));
    }

    #[actix_web::test]
    async fn test_malformed_metadata_is_rejected() {
        let err = parse(multipart(vec![metadata(
            r#"{"title":"Weed Clearing","format":"sideways"}"#,
        )]))
        .await
        .unwrap_err();

        assert!(matches!(err, MultipartParseError::SerializationError(_)));
    }

    #[actix_web::test]
    async fn test_unsupported_photo_is_rejected() {
        let err = parse(multipart(vec![
            metadata(r#"{"title":"Weed Clearing","format":"observation_only","observation":"Done"}"#),
            Part::File {
                name: "images",
                filename: "notes.txt",
                content_type: "text/plain",
                bytes: b"hello".to_vec(),
            },
        ]))
        .await
        .unwrap_err();

        match err {
            MultipartParseError::UnsupportedFile(name) => assert_eq!(name, "notes.txt"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_oversized_photo_is_rejected() {
        let payload = multipart(vec![
            metadata(OBSERVATION_ONLY),
            file("images", "big.png", vec![0u8; 4096]),
        ]);
        let err = MultipartParser::parse_activity_multipart(payload, UploadLimits::new(1024, 1 << 20))
            .await
            .unwrap_err();

        match err {
            MultipartParseError::TooLarge { field, limit } => {
                assert_eq!(field, "images");
                assert_eq!(limit, 1024);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_oversized_upload_is_rejected() {
        let photo = photo_bytes(8, 8, ImageFormat::Png);
        let part_limit = photo.len() + 1;
        let total_limit = photo.len() * 2 + OBSERVATION_ONLY.len();

        let payload = multipart(vec![
            metadata(OBSERVATION_ONLY),
            file("images", "a.png", photo.clone()),
            file("images", "b.png", photo.clone()),
            file("images", "c.png", photo),
        ]);
        let err = MultipartParser::parse_activity_multipart(
            payload,
            UploadLimits::new(part_limit, total_limit),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, MultipartParseError::TooLarge { .. }));
    }

    #[actix_web::test]
    async fn test_upload_within_limits_is_accepted() {
        let photo = photo_bytes(8, 8, ImageFormat::Png);
        let total_limit = photo.len() * 2 + OBSERVATION_ONLY.len();

        let payload = multipart(vec![
            metadata(OBSERVATION_ONLY),
            file("images", "a.png", photo.clone()),
            file("images", "b.png", photo.clone()),
        ]);
        let parsed = MultipartParser::parse_activity_multipart(
            payload,
            UploadLimits::new(photo.len(), total_limit),
        )
        .await
        .unwrap();

        assert_eq!(parsed.images.len(), 2);
    }

    #[test]
    fn test_multipart_parse_error_variants() {
        let field_error = MultipartParseError::FieldError("test field error".to_string());
        assert!(field_error.to_string().contains("test field error"));

        let metadata_error = MultipartParseError::MetadataError("test metadata error".to_string());
        assert!(metadata_error.to_string().contains("test metadata error"));

        let utf8_error = MultipartParseError::Utf8Error("test utf8 error".to_string());
        assert!(utf8_error.to_string().contains("test utf8 error"));

        let unsupported = MultipartParseError::UnsupportedFile("scan.gif".to_string());
        assert_eq!(
            unsupported.to_string(),
            "Unsupported file 'scan.gif': only PNG and JPEG photos are accepted"
        );

        let too_large = MultipartParseError::TooLarge {
            field: "images".to_string(),
            limit: 1024,
        };
        assert_eq!(
            too_large.to_string(),
            "Upload too large: 'images' exceeds the limit of 1024 bytes"
        );
    }
}
