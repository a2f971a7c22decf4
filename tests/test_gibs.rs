//! Integration tests for the NASA GIBS bounding-box path.
//!
//! Tests cover:
//! - Half-width lookup per zoom level
//! - GetMap URL and required headers
//! - Non-image payloads returned with a success status
//! - Center tile delegation for providers without tiles

mod common;

use common::*;
use helioscope::imagery::wms::{BBox, get_map_url, half_width_for_zoom};

#[test]
fn test_half_width_table() {
    assert_eq!(half_width_for_zoom(2), 20.0);
    assert_eq!(half_width_for_zoom(3), 10.0);
    assert_eq!(half_width_for_zoom(4), 5.0);
    assert_eq!(half_width_for_zoom(5), 2.0);
    assert_eq!(half_width_for_zoom(0), 5.0);
    assert_eq!(half_width_for_zoom(12), 5.0);
}

#[test]
fn test_bbox_around_point() {
    let bbox = BBox::around(40.0, -100.0, 10.0);
    assert_eq!(bbox.min_lat, 30.0);
    assert_eq!(bbox.min_lon, -110.0);
    assert_eq!(bbox.max_lat, 50.0);
    assert_eq!(bbox.max_lon, -90.0);
    assert_eq!(bbox.to_wms_param(), "30.0,-110.0,50.0,-90.0");
}

#[test]
fn test_bbox_param_pads_exponents() {
    let bbox = BBox {
        min_lat: -0.00001,
        min_lon: 0.0001,
        max_lat: 0.000025,
        max_lon: 1.5,
    };
    assert_eq!(bbox.to_wms_param(), "-1e-05,0.0001,2.5e-05,1.5");
}

#[test]
fn test_get_map_url() {
    let url = get_map_url(&BBox::around(10.0, 20.0, 2.0));
    assert_eq!(
        url,
        "https://gibs.earthdata.nasa.gov/wms/epsg4326/best/wms.cgi?service=WMS&request=GetMap\
         &layers=VIIRS_SNPP_CorrectedReflectance_TrueColor&styles=&width=1024&height=1024\
         &format=image/jpeg&transparent=false&version=1.3.0&crs=EPSG:4326&bbox=8.0,18.0,12.0,22.0"
    );
}

#[test]
fn test_gibs_wms_success() -> anyhow::Result<()> {
    let stub = StubTransport::always(jpeg_response(64, 64, [20, 40, 200]));
    let imagery = imagery_with(Provider::Gibs, &stub);

    let img = imagery.gibs_wms(40.0, -100.0, 3)?;

    assert_eq!(img.dimensions(), (64, 64));
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.ends_with("&bbox=30.0,-110.0,50.0,-90.0"));
    assert!(
        requests[0]
            .headers
            .iter()
            .any(|(k, v)| k == "User-Agent" && v == "Mozilla/5.0 (compatible; Imagen/1.0)")
    );
    Ok(())
}

#[test]
fn test_gibs_html_with_ok_status_is_data_error() {
    let stub = StubTransport::always(html_response(200));
    let imagery = imagery_with(Provider::Gibs, &stub);

    let err = imagery
        .gibs_wms(0.0, 0.0, 4)
        .expect_err("HTML is not imagery");

    assert_eq!(err.kind(), ErrorKind::Data);
    match err {
        ImageryError::NotAnImage {
            content_type,
            snippet,
            ..
        } => {
            assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
            assert!(snippet.contains("Service exception"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_gibs_missing_content_type_is_data_error() {
    let mut resp = jpeg_response(8, 8, [0, 0, 0]);
    resp.content_type = None;
    let stub = StubTransport::always(resp);
    let imagery = imagery_with(Provider::Gibs, &stub);

    let err = imagery.gibs_wms(0.0, 0.0, 4).expect_err("no content type");
    assert!(matches!(err, ImageryError::NotAnImage { .. }));
}

#[test]
fn test_gibs_error_status_is_network_error() {
    let stub = StubTransport::always(html_response(500));
    let imagery = imagery_with(Provider::Gibs, &stub);

    let err = imagery.gibs_wms(0.0, 0.0, 4).expect_err("500 should fail");

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(matches!(err, ImageryError::Network { status: 500, .. }));
}

#[test]
fn test_gibs_corrupt_image_is_decode_error() {
    let stub = StubTransport::always(HttpResponse {
        status: 200,
        content_type: Some("image/jpeg".to_string()),
        body: b"definitely not a jpeg".to_vec(),
    });
    let imagery = imagery_with(Provider::Gibs, &stub);

    let err = imagery.gibs_wms(0.0, 0.0, 4).expect_err("corrupt body");
    assert_eq!(err.kind(), ErrorKind::Data);
    assert!(matches!(err, ImageryError::Decode { .. }));
}

#[test]
fn test_center_tile_for_gibs_uses_wms() -> anyhow::Result<()> {
    let stub = StubTransport::always(jpeg_response(32, 32, [0, 0, 0]));
    let imagery = imagery_with(Provider::Gibs, &stub);

    imagery.center_tile(0.0, 0.0, 2, None)?;

    let urls = stub.urls();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].contains("request=GetMap"));
    assert!(urls[0].ends_with("&bbox=-20.0,-20.0,20.0,20.0"));
    Ok(())
}
