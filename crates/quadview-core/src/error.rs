use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuadviewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Annotation file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid unit conversion: {0}")]
    InvalidConversion(String),

    #[error("Unit conversion must be set before placing a {0} ruler")]
    ConversionNotSet(String),

    #[error("No viewer with id {0}")]
    UnknownViewer(u64),

    #[error("No active viewer")]
    NoActiveViewer,

    #[error("No annotation with id {0}")]
    UnknownAnnotation(u64),

    #[error("Annotation {0} is not a {1}")]
    WrongAnnotationKind(u64, &'static str),

    #[error("Unrecognized annotation file format")]
    UnrecognizedFormat,

    #[error("No annotations found")]
    NoAnnotations,

    #[error("Invalid value: {0}")]
    InvalidArgument(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QuadviewError>;
