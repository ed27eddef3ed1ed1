use std::fs::File;
use std::io::BufWriter;

use tempfile::tempdir;
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;
use xre_tiff::{
    Grid, SampleGrid, SampleType, XreTiffConfig, XreTiffError, XreTiffIo, get_metadata,
    read_xre_tif, write_xre_tif,
};

fn physical_4x4() -> Grid<f64> {
    let values: Vec<f64> = (0..16).map(|i| 100.0 + 0.1 * i as f64).collect();
    Grid::new(4, 4, values).unwrap()
}

#[test]
fn test_rescaled_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scan.tif");
    let original = physical_4x4();

    write_xre_tif(&path, &SampleGrid::from(original.clone()), true, 0.001, 100.0).unwrap();

    let physical = read_xre_tif(&path, true).unwrap().into_physical().unwrap();
    assert_eq!(physical.dimensions(), (4, 4));
    for (read, written) in physical.samples().iter().zip(original.samples()) {
        assert!((read - written).abs() <= 0.001, "{read} vs {written}");
    }

    let raw = read_xre_tif(&path, false).unwrap().into_raw().unwrap();
    let expected: Vec<u16> = (0..16).map(|i| i * 100).collect();
    assert_eq!(raw.samples(), expected.as_slice());

    let metadata = get_metadata(&path).unwrap();
    assert_eq!(metadata.slope, 0.001);
    assert_eq!(metadata.offset, 100.0);
    assert_eq!((metadata.width, metadata.height), (4, 4));
    assert_eq!(metadata.dtype, SampleType::U16);
}

#[test]
fn test_raw_round_trip_is_exact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("raw.tif");
    let raw = Grid::new(3, 2, vec![0u16, 1, 2, 1000, 40000, 65535]).unwrap();

    write_xre_tif(&path, &SampleGrid::from(raw.clone()), false, 1.0, 0.0).unwrap();

    let read = read_xre_tif(&path, false).unwrap();
    assert_eq!(read, SampleGrid::Raw(raw));
}

#[test]
fn test_metadata_dimensions_match_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wide.tif");
    let raw = Grid::new(7, 3, vec![5u16; 21]).unwrap();

    write_xre_tif(&path, &SampleGrid::from(raw), false, 2.5, -1.0).unwrap();

    let metadata = get_metadata(&path).unwrap();
    let grid = read_xre_tif(&path, false).unwrap();
    assert_eq!((metadata.width, metadata.height), grid.dimensions());
    assert_eq!(metadata.calibration().slope(), 2.5);
    assert_eq!(metadata.calibration().offset(), -1.0);
}

#[test]
fn test_clamping_on_rescaled_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clamped.tif");
    let physical = Grid::new(3, 1, vec![50.0f64, 99.0, 1000.0]).unwrap();

    write_xre_tif(&path, &SampleGrid::from(physical), true, 0.01, 50.0).unwrap();

    let raw = read_xre_tif(&path, false).unwrap().into_raw().unwrap();
    assert_eq!(raw.samples(), &[0, 4900, 65535]);
}

#[test]
fn test_zero_slope_write_creates_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.tif");

    let result = write_xre_tif(&path, &SampleGrid::from(physical_4x4()), true, 0.0, 100.0);

    assert!(matches!(result, Err(XreTiffError::ZeroSlope)));
    assert!(!path.exists());
}

#[test]
fn test_invalid_raw_write_creates_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.tif");

    let result = write_xre_tif(&path, &SampleGrid::from(physical_4x4()), false, 1.0, 0.0);

    assert!(matches!(result, Err(XreTiffError::InvalidRawSample { .. })));
    assert!(!path.exists());
}

#[test]
fn test_plain_tiff_without_description_reads_as_identity() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.tif");
    {
        let file = BufWriter::new(File::create(&path).unwrap());
        let mut encoder = TiffEncoder::new(file).unwrap();
        encoder
            .write_image::<colortype::Gray16>(2, 2, &[10u16, 20, 30, 40])
            .unwrap();
    }

    let metadata = get_metadata(&path).unwrap();
    assert_eq!((metadata.slope, metadata.offset), (1.0, 0.0));

    let physical = read_xre_tif(&path, true).unwrap().into_physical().unwrap();
    assert_eq!(physical.samples(), &[10.0, 20.0, 30.0, 40.0]);
}

#[test]
fn test_externally_written_description_is_parsed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("external.tif");
    {
        let file = BufWriter::new(File::create(&path).unwrap());
        let mut encoder = TiffEncoder::new(file).unwrap();
        let mut image = encoder.new_image::<colortype::Gray16>(2, 1).unwrap();
        image
            .encoder()
            .write_tag(Tag::ImageDescription, "Slope=2.5e-1  OFFSET = -4")
            .unwrap();
        image.write_data(&[4u16, 8]).unwrap();
    }

    let physical = read_xre_tif(&path, true).unwrap().into_physical().unwrap();
    assert_eq!(physical.samples(), &[-3.0, -2.0]);
}

#[test]
fn test_non_gray16_tiff_is_unsupported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gray8.tif");
    {
        let file = BufWriter::new(File::create(&path).unwrap());
        let mut encoder = TiffEncoder::new(file).unwrap();
        encoder
            .write_image::<colortype::Gray8>(2, 1, &[1u8, 2])
            .unwrap();
    }

    let result = read_xre_tif(&path, false);
    assert!(matches!(result, Err(XreTiffError::UnsupportedFormat(_))));
}

#[test]
fn test_missing_file_is_an_input_error() {
    let dir = tempdir().unwrap();
    let result = get_metadata(dir.path().join("missing.tif"));
    assert!(matches!(result, Err(XreTiffError::InputReadError(_))));
}

#[test]
fn test_software_tag_is_configurable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("software.tif");
    let config = XreTiffConfig::builder()
        .software(Some("beamline-7".to_string()))
        .build();
    let io = XreTiffIo::new(config);
    let raw = Grid::new(1, 1, vec![1u16]).unwrap();

    io.write(&path, &SampleGrid::from(raw), &Default::default()).unwrap();

    let file = File::open(&path).unwrap();
    let mut decoder = tiff::decoder::Decoder::new(file).unwrap();
    let software = decoder.get_tag_ascii_string(Tag::Software).unwrap();
    assert_eq!(software, "beamline-7");
}

#[test]
fn test_single_precision_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("f32.tif");
    let raw = Grid::new(2, 1, vec![0u16, 10]).unwrap();
    write_xre_tif(&path, &SampleGrid::from(raw), false, 0.5, 1.0).unwrap();

    let physical: Grid<f32> = XreTiffIo::new(XreTiffConfig::default()).read_physical(&path).unwrap();
    assert_eq!(physical.samples(), &[1.0f32, 6.0]);
}

#[test]
fn test_signed_gray16_tiff_is_unsupported_on_every_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("signed.tif");
    {
        let file = BufWriter::new(File::create(&path).unwrap());
        let mut encoder = TiffEncoder::new(file).unwrap();
        encoder
            .write_image::<colortype::GrayI16>(2, 1, &[-1i16, 7])
            .unwrap();
    }

    let metadata = get_metadata(&path);
    assert!(matches!(metadata, Err(XreTiffError::UnsupportedFormat(_))));

    let read = read_xre_tif(&path, false);
    assert!(matches!(read, Err(XreTiffError::UnsupportedFormat(_))));
}

#[test]
fn test_written_file_is_little_endian() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("order.tif");
    let raw = Grid::new(2, 1, vec![0x0102u16, 0xfffe]).unwrap();

    write_xre_tif(&path, &SampleGrid::from(raw), false, 1.0, 0.0).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[0..4], b"II\x2a\x00");
}
