//! Loading of the bundled reference assets used as few-shot demonstrations.
//!
//! Assets are re-read from disk on every conversion request. They are part of
//! the deployment rather than user input, so a missing file is a defect and is
//! reported as an [`AssetError`] without any fallback.
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::AssetError;

/// Media type prefix applied to every inline image, whatever its real format
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Markup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceAsset {
    Stylesheet,
    ExampleOneImage,
    ExampleOneDocument,
    ExampleTwoImage,
    ExampleTwoDocument,
}

impl ReferenceAsset {
    pub const ALL: [ReferenceAsset; 5] = [
        ReferenceAsset::Stylesheet,
        ReferenceAsset::ExampleOneImage,
        ReferenceAsset::ExampleOneDocument,
        ReferenceAsset::ExampleTwoImage,
        ReferenceAsset::ExampleTwoDocument,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ReferenceAsset::Stylesheet => "sbgn_stylesheet.png",
            ReferenceAsset::ExampleOneImage => "Vitamins_B6_activation_to_pyridoxal_phosphate.png",
            ReferenceAsset::ExampleOneDocument => {
                "Vitamins_B6_activation_to_pyridoxal_phosphate.sbgn"
            }
            ReferenceAsset::ExampleTwoImage => "Activated_STAT1alpha_induction_of_the_IRF1_gene.png",
            ReferenceAsset::ExampleTwoDocument => {
                "Activated_STAT1alpha_induction_of_the_IRF1_gene.sbgn"
            }
        }
    }

    pub fn media_kind(&self) -> MediaKind {
        match self {
            ReferenceAsset::Stylesheet
            | ReferenceAsset::ExampleOneImage
            | ReferenceAsset::ExampleTwoImage => MediaKind::Image,
            ReferenceAsset::ExampleOneDocument | ReferenceAsset::ExampleTwoDocument => {
                MediaKind::Markup
            }
        }
    }
}

impl fmt::Display for ReferenceAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceAsset::Stylesheet => "stylesheet",
            ReferenceAsset::ExampleOneImage => "example-one image",
            ReferenceAsset::ExampleOneDocument => "example-one document",
            ReferenceAsset::ExampleTwoImage => "example-two image",
            ReferenceAsset::ExampleTwoDocument => "example-two document",
        };
        f.write_str(name)
    }
}

/// A worked example: a hand-drawn image and the document it should produce
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub image: String,
    pub document: String,
}

/// All reference material needed to compose one conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSet {
    pub stylesheet: String,
    pub example_one: Example,
    pub example_two: Example,
}

/// Encode raw image bytes as an inline `data:image/png;base64,...` URI
pub fn encode_data_uri(bytes: &[u8]) -> String {
    format!("{}{}", DATA_URI_PREFIX, BASE64.encode(bytes))
}

#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, asset: ReferenceAsset) -> PathBuf {
        self.root.join(asset.file_name())
    }

    /// Read the raw bytes of an asset
    pub async fn read(&self, asset: ReferenceAsset) -> Result<Vec<u8>, AssetError> {
        let path = self.path(asset);
        tokio::fs::read(&path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                AssetError::Missing { asset, path }
            } else {
                AssetError::Read {
                    asset,
                    path,
                    source,
                }
            }
        })
    }

    pub async fn image_data_uri(&self, asset: ReferenceAsset) -> Result<String, AssetError> {
        let bytes = self.read(asset).await?;
        Ok(encode_data_uri(&bytes))
    }

    /// Read a reference document as text, without any transformation
    pub async fn document(&self, asset: ReferenceAsset) -> Result<String, AssetError> {
        let bytes = self.read(asset).await?;
        String::from_utf8(bytes).map_err(|_| AssetError::NotUtf8 {
            asset,
            path: self.path(asset),
        })
    }

    pub async fn load_references(&self) -> Result<ReferenceSet, AssetError> {
        Ok(ReferenceSet {
            stylesheet: self.image_data_uri(ReferenceAsset::Stylesheet).await?,
            example_one: Example {
                image: self.image_data_uri(ReferenceAsset::ExampleOneImage).await?,
                document: self.document(ReferenceAsset::ExampleOneDocument).await?,
            },
            example_two: Example {
                image: self.image_data_uri(ReferenceAsset::ExampleTwoImage).await?,
                document: self.document(ReferenceAsset::ExampleTwoDocument).await?,
            },
        })
    }

    /// Check that every reference file is present, for use at startup
    pub fn verify(&self) -> Result<(), AssetError> {
        for asset in ReferenceAsset::ALL {
            let path = self.path(asset);
            if !path.is_file() {
                return Err(AssetError::Missing { asset, path });
            }
        }
        Ok(())
    }
}
