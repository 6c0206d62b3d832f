#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use image::Luma;

    use crate::image_pipeline::batch::pipeline::BatchPipeline;
    use crate::image_pipeline::batch::types::{FailurePolicy, QuantConfig};
    use crate::image_pipeline::common::error::{QuantError, Result, Stage};
    use crate::image_pipeline::raster::{GrayFrame, ImageBuffer, RasterReader};
    use crate::image_pipeline::records::WellIdParser;

    /// Returns a fixed buffer, or fails for inputs starting with `bad`.
    struct MockReader {
        image: ImageBuffer,
    }

    impl RasterReader for MockReader {
        fn read_raster(&self, data: &[u8]) -> Result<ImageBuffer> {
            if data.starts_with(b"bad") {
                return Err(QuantError::DecodeFailure("Mock decode error".to_string()));
            }
            Ok(self.image.clone())
        }
    }

    fn scene(with_square: bool) -> GrayFrame {
        GrayFrame::from_fn(100, 100, |x, y| {
            if with_square && (45..55).contains(&x) && (45..55).contains(&y) {
                Luma([0.9])
            } else {
                Luma([0.2])
            }
        })
    }

    fn config() -> QuantConfig {
        QuantConfig::builder()
            .sigma(10.0)
            .crop_fraction(0.05)
            .processing_date(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap())
            .build()
    }

    fn pipeline_for(frame: GrayFrame, config: QuantConfig) -> BatchPipeline<MockReader> {
        let reader = MockReader {
            image: ImageBuffer::single(frame).unwrap(),
        };
        BatchPipeline::with_custom(reader, config).unwrap()
    }

    fn write_inputs(dir: &Path, files: &[(&str, &[u8])]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|(name, contents)| {
                let path = dir.join(name);
                std::fs::write(&path, contents).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_config_builder() {
        let config = QuantConfig::builder()
            .sigma(25.0)
            .crop_fraction(0.1)
            .failure_policy(FailurePolicy::SkipAndContinue)
            .parallel(false)
            .threads(Some(3))
            .well_parser(WellIdParser::new('-', 1))
            .build();

        assert_eq!(config.sigma, 25.0);
        assert_eq!(config.crop_fraction, 0.1);
        assert_eq!(config.failure_policy, FailurePolicy::SkipAndContinue);
        assert!(!config.parallel);
        assert_eq!(config.threads, Some(3));
        assert_eq!(config.well_parser, WellIdParser::new('-', 1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let image = ImageBuffer::single(scene(false)).unwrap();
        let bad_crop = QuantConfig::builder().crop_fraction(0.5).build();
        let bad_sigma = QuantConfig::builder().sigma(0.0).build();

        let result = BatchPipeline::with_custom(MockReader { image: image.clone() }, bad_crop);
        assert!(matches!(result, Err(QuantError::InvalidCropFraction(_))));

        let result = BatchPipeline::with_custom(MockReader { image: image.clone() }, bad_sigma);
        assert!(matches!(result, Err(QuantError::InvalidSigma(_))));

        let huge_sigma = QuantConfig::builder().sigma(1.0e12).build();
        let result = BatchPipeline::with_custom(MockReader { image }, huge_sigma);
        assert!(matches!(result, Err(QuantError::InvalidSigma(_))));
    }

    #[test]
    fn test_synthetic_square_scene() {
        let with_square = pipeline_for(scene(true), config())
            .process(Path::new("/plate/B7_01.tif"), b"img")
            .unwrap();
        let without_square = pipeline_for(scene(false), config())
            .process(Path::new("/plate/B7_01.tif"), b"img")
            .unwrap();

        assert_eq!(with_square.total_pixels_in_image(), 90 * 90);
        assert!(with_square.count_black_pixels() > 0);
        assert_eq!(
            with_square.non_black_pixels() + with_square.count_black_pixels(),
            with_square.total_pixels_in_image()
        );
        assert!(with_square.total_intensity() > without_square.total_intensity());
    }

    #[test]
    fn test_record_metadata() {
        let record = pipeline_for(scene(true), config())
            .process(Path::new("/plate/run1/B7_04_1_1_Bright Field_001.tif"), b"img")
            .unwrap();

        assert_eq!(record.filename(), "B7_04_1_1_Bright Field_001.tif");
        assert_eq!(record.directory(), "/plate/run1");
        assert_eq!(record.date(), "2026-10-15");
        assert_eq!(record.well(), "B07");
        assert_eq!(record.crop(), 0.05);
        assert_eq!(record.sigma_gblur(), 10.0);
    }

    #[test]
    fn test_processing_is_repeatable() {
        let pipeline = pipeline_for(scene(true), config());
        let first = pipeline.process(Path::new("A1_01.tif"), b"img").unwrap();
        let second = pipeline.process(Path::new("A1_01.tif"), b"img").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_multi_frame_matches_single_frame() {
        let single = pipeline_for(scene(true), config())
            .process(Path::new("A1_01.tif"), b"img")
            .unwrap();

        let stack = ImageBuffer::from_frames(vec![scene(true), scene(false)]).unwrap();
        let multi = BatchPipeline::with_custom(MockReader { image: stack }, config())
            .unwrap()
            .process(Path::new("A1_01.tif"), b"img")
            .unwrap();

        assert_relative_eq!(single.total_intensity(), multi.total_intensity());
        assert_eq!(single.count_black_pixels(), multi.count_black_pixels());
    }

    #[test]
    fn test_fail_fast_reports_file_and_stage() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_inputs(
            dir.path(),
            &[
                ("A1_01.tif", &b"ok"[..]),
                ("A2_01.tif", &b"bad"[..]),
                ("A3_01.tif", &b"ok"[..]),
            ],
        );
        let pipeline = pipeline_for(scene(true), config());

        let err = pipeline.run(&paths).unwrap_err();

        match &err {
            QuantError::ImageFailed { file, stage, .. } => {
                assert!(file.ends_with("A2_01.tif"));
                assert_eq!(*stage, Stage::Decode);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root(), QuantError::DecodeFailure(_)));
    }

    #[test]
    fn test_skip_and_continue_omits_failures() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_inputs(
            dir.path(),
            &[
                ("A1_01.tif", &b"ok"[..]),
                ("A2_01.tif", &b"bad"[..]),
                ("A3_01.tif", &b"ok"[..]),
            ],
        );
        let mut config = config();
        config.failure_policy = FailurePolicy::SkipAndContinue;
        let pipeline = pipeline_for(scene(true), config);

        let records = pipeline.run(&paths).unwrap();

        let names: Vec<_> = records.iter().map(|r| r.filename()).collect();
        assert_eq!(names, ["A1_01.tif", "A3_01.tif"]);
    }

    #[test]
    fn test_missing_file_is_decode_failure() {
        let pipeline = pipeline_for(scene(true), config());
        let err = pipeline.run(&[PathBuf::from("/no/such/B3_01.tif")]).unwrap_err();

        assert!(matches!(err, QuantError::ImageFailed { stage: Stage::Decode, .. }));
        assert!(matches!(err.root(), QuantError::DecodeFailure(_)));
    }

    #[test]
    fn test_crop_stage_failure() {
        let tiny = GrayFrame::from_pixel(2, 2, Luma([0.5]));
        let mut config = config();
        config.crop_fraction = 0.3;
        let pipeline = pipeline_for(tiny, config);

        let err = pipeline.process(Path::new("H12_01.tif"), b"img").unwrap_err();

        assert!(matches!(err, QuantError::ImageFailed { stage: Stage::Crop, .. }));
        assert!(matches!(err.root(), QuantError::InvalidCropFraction(_)));
    }

    #[test]
    fn test_parallel_output_follows_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let names: Vec<String> = (1..=12).rev().map(|i| format!("C{}_01.tif", i)).collect();
        let files: Vec<(&str, &[u8])> = names.iter().map(|n| (n.as_str(), &b"ok"[..])).collect();
        let paths = write_inputs(dir.path(), &files);

        let mut sequential = config();
        sequential.parallel = false;
        let mut pooled = config();
        pooled.threads = Some(3);

        let a = pipeline_for(scene(true), sequential).run(&paths).unwrap();
        let b = pipeline_for(scene(true), pooled).run(&paths).unwrap();
        let c = pipeline_for(scene(true), config()).run(&paths).unwrap();

        let order: Vec<_> = c.iter().map(|r| r.filename().to_string()).collect();
        assert_eq!(order, names);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }
}
