use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use resizer_storage::{InMemoryStorage, StoredObject};
use serde_json::{json, Value};

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode fixture image");
    buffer
}

/// A gradient so resampling has something to work on.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 180]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

pub fn seed(
    storage: &InMemoryStorage,
    bucket: &str,
    key: &str,
    data: Vec<u8>,
    content_type: Option<&str>,
) {
    storage.insert(
        bucket,
        key,
        StoredObject::new(Bytes::from(data), content_type.map(str::to_string)),
    );
}

/// Platform-shaped notification for one object per key, keys passed verbatim.
pub fn notification(bucket: &str, raw_keys: &[&str]) -> Value {
    let records: Vec<Value> = raw_keys
        .iter()
        .map(|key| {
            json!({
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "2026-01-01T00:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "resize-on-upload",
                    "bucket": {
                        "name": bucket,
                        "arn": format!("arn:aws:s3:::{}", bucket)
                    },
                    "object": {
                        "key": key,
                        "size": 1024,
                        "eTag": "d41d8cd98f00b204e9800998ecf8427e",
                        "sequencer": "0A1B2C3D4E5F678901"
                    }
                }
            })
        })
        .collect();

    json!({ "Records": records })
}

pub fn dimensions_of(data: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory(data).expect("Output is not a decodable image");
    (img.width(), img.height())
}

pub fn format_of(data: &[u8]) -> ImageFormat {
    image::guess_format(data).expect("Output format not recognised")
}
