//! Region text → map coordinates, and per-country marker clustering.

use std::collections::HashMap;

use serde::Serialize;

use crate::news::NewsRecord;

/// Topics listed in a marker popup.
const MARKER_PREVIEW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Substring looked for in the region text.
    pub key: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub country: &'static str,
}

const fn coord(key: &'static str, lat: f64, lng: f64, country: &'static str) -> Coordinate {
    Coordinate { key, lat, lng, country }
}

/// Checked in order; the first key contained in the region text wins.
pub const COORDINATES: &[Coordinate] = &[
    coord("中国", 35.8617, 104.1954, "中国"),
    coord("美国", 37.0902, -95.7129, "美国"),
    coord("日本", 36.2048, 138.2529, "日本"),
    coord("澳大利亚", -25.2744, 133.7751, "澳大利亚"),
    coord("英国", 55.3781, -3.4360, "英国"),
    coord("加拿大", 56.1304, -106.3468, "加拿大"),
    coord("德国", 51.1657, 10.4515, "德国"),
    coord("法国", 46.2276, 2.2137, "法国"),
    coord("巴西", -14.2350, -51.9253, "巴西"),
    coord("印度", 20.5937, 78.9629, "印度"),
    coord("俄罗斯", 61.5240, 105.3188, "俄罗斯"),
    coord("韩国", 35.9078, 127.7669, "韩国"),
    coord("意大利", 41.8719, 12.5674, "意大利"),
    coord("西班牙", 40.4637, -3.7492, "西班牙"),
    coord("墨西哥", 23.6345, -102.5528, "墨西哥"),
    coord("印尼", -0.7893, 113.9213, "印度尼西亚"),
    coord("荷兰", 52.1326, 5.2913, "荷兰"),
    coord("沙特", 23.8859, 45.0792, "沙特阿拉伯"),
    coord("土耳其", 38.9637, 35.2433, "土耳其"),
    coord("泰国", 15.8700, 100.9925, "泰国"),
];

/// Find the coordinate for a free-text region.
pub fn locate(region: &str) -> Option<&'static Coordinate> {
    COORDINATES.iter().find(|c| region.contains(c.key))
}

/// Marker colour by record count.
pub fn color_for_count(count: usize) -> &'static str {
    match count {
        n if n >= 10 => "#d73027",
        n if n >= 5 => "#fc8d59",
        n if n >= 2 => "#fee08b",
        _ => "#d9ef8b",
    }
}

/// Marker radius in pixels, between 8 and 30.
pub fn radius_for_count(count: usize) -> usize {
    (count * 3).clamp(8, 30)
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionMarker {
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    pub count: usize,
    pub color: String,
    pub radius: usize,
    /// First few topics for the popup.
    pub topics: Vec<String>,
}

/// Cluster records by located country. Records whose region cannot be
/// located are skipped. Ordered by count, then country.
pub fn region_markers(records: &[NewsRecord]) -> Vec<RegionMarker> {
    let mut by_country: HashMap<&'static str, (&'static Coordinate, Vec<&NewsRecord>)> =
        HashMap::new();

    for record in records {
        let region = record.region.trim();
        if region.is_empty() {
            continue;
        }
        if let Some(c) = locate(region) {
            by_country.entry(c.country).or_insert((c, Vec::new())).1.push(record);
        }
    }

    let mut markers: Vec<RegionMarker> = by_country
        .into_values()
        .map(|(c, news)| RegionMarker {
            country: c.country.to_string(),
            lat: c.lat,
            lng: c.lng,
            count: news.len(),
            color: color_for_count(news.len()).to_string(),
            radius: radius_for_count(news.len()),
            topics: news
                .iter()
                .take(MARKER_PREVIEW)
                .map(|r| r.topic.clone())
                .collect(),
        })
        .collect();

    markers.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country)));
    markers
}
