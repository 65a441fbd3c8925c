use serde::{Deserialize, Serialize};

use crate::shapes::repo::Shape;

pub(crate) fn default_color() -> String {
    "bg-blue-500".into()
}

pub(crate) fn default_size() -> i32 {
    48
}

/// All fields optional; a missing body means a default shape at the origin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShapeRequest {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_size")]
    pub size: i32,
}

impl Default for CreateShapeRequest {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            color: default_color(),
            size: default_size(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShapeRequest {
    pub shape_id: i32,
    pub x: i32,
    pub y: i32,
    pub color: String,
    pub size: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteShapeRequest {
    pub shape_id: i32,
}

#[derive(Debug, Serialize)]
pub struct ShapesResponse {
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Serialize)]
pub struct ShapeResponse {
    pub shape: Shape,
}

#[derive(Debug, Serialize)]
pub struct DeleteShapeResponse {
    pub success: bool,
}
