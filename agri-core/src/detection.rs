//! Plant disease detection.
//!
//! There is no classifier behind this module. An accepted upload is answered
//! with one of four fixed diagnosis records, picked uniformly from the random
//! source the caller supplies.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Largest accepted image, in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted for plant photos.
pub const ACCEPTED_CONTENT_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please upload a PNG, JPG, or JPEG image.")]
    InvalidFileType { content_type: Option<String> },

    #[error("Please upload an image smaller than 10MB.")]
    FileTooLarge { size_bytes: u64 },
}

/// Metadata of an uploaded image. The pixels are never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: u64,
}

impl ImageUpload {
    /// Builds an upload, inferring the content type from the file extension.
    pub fn from_path(
        path: &Path,
        size_bytes: u64,
    ) -> Self {
        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .and_then(|ext| match ext.as_str() {
                "png" => Some("image/png"),
                "jpg" | "jpeg" => Some("image/jpeg"),
                _ => None,
            })
            .map(str::to_string);

        Self {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            content_type,
            size_bytes,
        }
    }
}

/// Checks type first, then size.
pub fn validate_upload(upload: &ImageUpload) -> Result<(), UploadError> {
    let accepted = upload
        .content_type
        .as_deref()
        .is_some_and(|ct| ACCEPTED_CONTENT_TYPES.contains(&ct));
    if !accepted {
        warn!(file = %upload.file_name, content_type = ?upload.content_type, "rejected upload type");
        return Err(UploadError::InvalidFileType {
            content_type: upload.content_type.clone(),
        });
    }

    if upload.size_bytes > MAX_UPLOAD_BYTES {
        warn!(file = %upload.file_name, size = upload.size_bytes, "rejected oversized upload");
        return Err(UploadError::FileTooLarge {
            size_bytes: upload.size_bytes,
        });
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub disease: String,
    pub confidence: f64,
    pub severity: Severity,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
}

impl DetectionResult {
    pub fn is_healthy(&self) -> bool {
        self.disease == HEALTHY_PLANT
    }

    /// One-line outcome, e.g. "Late Blight detected with 94.5% confidence."
    pub fn summary(&self) -> String {
        if self.is_healthy() {
            "Great news! Your plant appears healthy.".to_string()
        } else {
            format!(
                "{} detected with {:.1}% confidence.",
                self.disease, self.confidence
            )
        }
    }
}

const HEALTHY_PLANT: &str = "Healthy Plant";

struct Diagnosis {
    disease: &'static str,
    confidence: f64,
    severity: Severity,
    treatment: [&'static str; 4],
    prevention: [&'static str; 4],
}

impl Diagnosis {
    fn to_result(&self) -> DetectionResult {
        DetectionResult {
            disease: self.disease.to_string(),
            confidence: self.confidence,
            severity: self.severity,
            treatment: self.treatment.iter().map(|s| s.to_string()).collect(),
            prevention: self.prevention.iter().map(|s| s.to_string()).collect(),
        }
    }
}

static DIAGNOSES: [Diagnosis; 4] = [
    Diagnosis {
        disease: "Late Blight",
        confidence: 94.5,
        severity: Severity::High,
        treatment: [
            "Remove and destroy infected plants immediately",
            "Apply copper-based fungicide every 7-10 days",
            "Improve air circulation around plants",
            "Reduce humidity by avoiding overhead watering",
        ],
        prevention: [
            "Plant resistant varieties",
            "Ensure proper spacing between plants",
            "Use drip irrigation instead of overhead watering",
            "Apply preventive fungicide before symptoms appear",
        ],
    },
    Diagnosis {
        disease: "Powdery Mildew",
        confidence: 91.2,
        severity: Severity::Medium,
        treatment: [
            "Apply sulfur or potassium bicarbonate spray",
            "Remove heavily infected leaves",
            "Improve air circulation",
            "Apply neem oil solution every 7 days",
        ],
        prevention: [
            "Avoid overhead watering",
            "Plant in areas with good air circulation",
            "Maintain proper plant spacing",
            "Apply preventive sulfur spray",
        ],
    },
    Diagnosis {
        disease: "Bacterial Spot",
        confidence: 88.7,
        severity: Severity::Medium,
        treatment: [
            "Apply copper-based bactericide",
            "Remove infected plant parts",
            "Avoid working with wet plants",
            "Use disease-free seeds for next planting",
        ],
        prevention: [
            "Use disease-resistant varieties",
            "Practice crop rotation",
            "Avoid overhead irrigation",
            "Sanitize tools between uses",
        ],
    },
    Diagnosis {
        disease: HEALTHY_PLANT,
        confidence: 96.8,
        severity: Severity::Low,
        treatment: [
            "No treatment needed",
            "Continue regular care and monitoring",
            "Maintain current watering schedule",
            "Keep monitoring for early signs of disease",
        ],
        prevention: [
            "Maintain proper nutrition",
            "Ensure adequate watering",
            "Monitor regularly for pests",
            "Practice good garden hygiene",
        ],
    },
];

/// Every record [`detect`] can return, in table order.
pub fn known_results() -> Vec<DetectionResult> {
    DIAGNOSES.iter().map(Diagnosis::to_result).collect()
}

/// Validates `upload` and returns a diagnosis drawn from the fixed table.
pub fn detect<R: Rng + ?Sized>(
    upload: &ImageUpload,
    rng: &mut R,
) -> Result<DetectionResult, UploadError> {
    validate_upload(upload)?;

    let result = DIAGNOSES[rng.gen_range(0..DIAGNOSES.len())].to_result();

    info!(file = %upload.file_name, disease = %result.disease, "plant image analysed");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn png(size_bytes: u64) -> ImageUpload {
        ImageUpload {
            file_name: "leaf.png".to_string(),
            content_type: Some("image/png".to_string()),
            size_bytes,
        }
    }

    // =========================================================================
    // upload validation tests
    // =========================================================================

    #[test]
    fn from_path_infers_jpeg_for_both_extensions() {
        let jpg = ImageUpload::from_path(Path::new("/tmp/a.JPG"), 10);
        let jpeg = ImageUpload::from_path(Path::new("b.jpeg"), 10);

        assert_eq!(jpg.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(jpg.file_name, "a.JPG");
        assert_eq!(jpeg.content_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn from_path_leaves_unknown_extension_untyped() {
        let upload = ImageUpload::from_path(Path::new("scan.gif"), 10);

        assert_eq!(upload.content_type, None);
    }

    #[test]
    fn validate_upload_accepts_limit_exactly() {
        assert_eq!(validate_upload(&png(MAX_UPLOAD_BYTES)), Ok(()));
    }

    #[test]
    fn validate_upload_rejects_one_byte_over_limit() {
        assert_eq!(
            validate_upload(&png(MAX_UPLOAD_BYTES + 1)),
            Err(UploadError::FileTooLarge {
                size_bytes: MAX_UPLOAD_BYTES + 1
            })
        );
    }

    #[test]
    fn validate_upload_checks_type_before_size() {
        let upload = ImageUpload {
            file_name: "huge.gif".to_string(),
            content_type: Some("image/gif".to_string()),
            size_bytes: MAX_UPLOAD_BYTES * 2,
        };

        assert!(matches!(
            validate_upload(&upload),
            Err(UploadError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn validate_upload_rejects_missing_type() {
        let upload = ImageUpload {
            content_type: None,
            ..png(1)
        };

        assert_eq!(
            validate_upload(&upload),
            Err(UploadError::InvalidFileType { content_type: None })
        );
    }

    // =========================================================================
    // detect tests
    // =========================================================================

    #[test]
    fn detect_returns_a_known_record() {
        let known = known_results();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let result = detect(&png(2048), &mut rng).unwrap();
            assert!(known.contains(&result));
        }
    }

    #[test]
    fn detect_eventually_returns_every_record() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            seen.insert(detect(&png(2048), &mut rng).unwrap().disease);
        }

        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn detect_propagates_upload_errors() {
        let mut rng = StdRng::seed_from_u64(0);

        assert!(detect(&png(MAX_UPLOAD_BYTES + 1), &mut rng).is_err());
    }

    #[test]
    fn summary_reports_disease_with_one_decimal() {
        let blight = &known_results()[0];

        assert_eq!(
            blight.summary(),
            "Late Blight detected with 94.5% confidence."
        );
        assert!(!blight.is_healthy());
    }

    #[test]
    fn summary_for_healthy_plant() {
        let healthy = &known_results()[3];

        assert!(healthy.is_healthy());
        assert_eq!(healthy.severity, Severity::Low);
        assert_eq!(healthy.summary(), "Great news! Your plant appears healthy.");
    }

    #[test]
    fn every_record_has_four_steps_each() {
        for result in known_results() {
            assert_eq!(result.treatment.len(), 4);
            assert_eq!(result.prevention.len(), 4);
        }
    }
}
