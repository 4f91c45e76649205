use unl_core::polyhash::{
    compress, compress_to_bytes, decompress, decompress_blocks, deflate, inflate, to_coordinates,
    to_polyhash,
};
use unl_core::{Cluster, Config, LatLon, PolyhashBlock, UnlError};

fn outline() -> Vec<LatLon> {
    [
        (42.9252986, -72.2794631),
        (42.9251827, -72.2794363),
        (42.9252043, -72.2790635),
        (42.9248076, -72.2789964),
        (42.9248272, -72.2788462),
        (42.9251297, -72.2788945),
        (42.9251572, -72.2784975),
        (42.9252691, -72.2785324),
        (42.9252416, -72.2788891),
        (42.9253595, -72.278924),
        (42.9253575, -72.2790098),
        (42.9253261, -72.2790071),
        (42.9252986, -72.2794631),
    ]
    .iter()
    .map(|&(lat, lon)| LatLon::new(lat, lon))
    .collect()
}

#[test]
fn test_outline_to_polyhash() {
    let blocks = to_polyhash(&outline(), 9).unwrap();
    assert_eq!(
        inflate(&blocks).unwrap(),
        vec![
            "drss5nr9y",
            "drss5nr9r",
            "drss5nrcr",
            "drss5q0p1",
            "drss5q0ph",
            "drss5q215",
            "drss5q23h",
            "drss5q23u",
            "drss5q21e",
            "drss5q246",
            "drss5q243",
            "drss5q241",
            "drss5nr9y",
        ]
    );
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].data[1], "r");
}

#[test]
fn test_outline_compress_roundtrip() {
    let blocks = to_polyhash(&outline(), 9).unwrap();
    let compressed = compress(&blocks).unwrap();
    assert_eq!(decompress(&compressed).unwrap(), inflate(&blocks).unwrap());
    assert_eq!(decompress_blocks(&compress_to_bytes(&blocks).unwrap()).unwrap(), blocks);
}

#[test]
fn test_outline_to_coordinates() {
    let blocks = to_polyhash(&outline(), 9).unwrap();
    let points = to_coordinates(&blocks).unwrap();
    assert_eq!(points.len(), 13);
    for (point, original) in points.iter().zip(outline()) {
        // a precision-9 cell is about 5 metres across
        assert!((point.lat - original.lat).abs() < 5e-5);
        assert!((point.lon - original.lon).abs() < 5e-5);
    }
}

#[test]
fn test_mixed_precision_roundtrip() {
    let ids = [
        "d", "dr", "drs", "drss", "drss5", "drss5n", "drss5nr", "drss5nr9", "drss5nr9y",
        "u4pruydqqvj8pr9n", "u4pruydqqvj8pr9p", "6", "6g",
    ];
    let compressed = compress(&deflate(&ids)).unwrap();
    assert_eq!(decompress(&compressed).unwrap(), ids);
}

#[test]
fn test_whitespace_around_base64_is_ignored() {
    assert_eq!(decompress("  jZLc\n").unwrap(), vec!["d", "dr"]);
}

#[test]
fn test_precision_limit() {
    assert!(matches!(
        to_polyhash(&[], 19),
        Err(UnlError::PrecisionOutOfRange { precision: 19, .. })
    ));
    assert!(matches!(
        unl_core::to_cluster(Vec::<[f64; 2]>::new(), 19),
        Err(UnlError::PrecisionOutOfRange { precision: 19, .. })
    ));
}

#[test]
fn test_cluster_polyhash_from_config() {
    let cluster = Cluster::new().with_config(Config::default().with_default_precision(9));
    let blocks = cluster.polyhash(&outline()).unwrap();
    assert_eq!(blocks, to_polyhash(&outline(), 9).unwrap());
}

#[test]
fn test_hand_built_blocks() {
    let blocks = vec![
        PolyhashBlock::new(2, vec!["m9".into()]),
        PolyhashBlock::new(1, vec!["m".into()]),
    ];
    let compressed = compress(&blocks).unwrap();
    assert_eq!(decompress_blocks(&compress_to_bytes(&blocks).unwrap()).unwrap(), blocks);
    assert_eq!(decompress(&compressed).unwrap(), vec!["m9", "m"]);
}
