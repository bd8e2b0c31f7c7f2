//! Page configuration schema.
//!
//! This module defines the data model a page is assembled from: fragments,
//! the assets each fragment needs and the shared dependencies those assets
//! reference. All types derive Serde traits for the JSON wire format
//! (camelCase keys).

use serde::{Deserialize, Serialize};

/// Root configuration for one page instance.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Page identifier.
    pub page: String,

    /// Fragment descriptors composing the page.
    pub fragments: Vec<FragmentConfig>,

    /// Every asset declared by the page's fragments.
    pub assets: Vec<Asset>,

    /// Shared dependencies referenced by assets.
    pub dependencies: Vec<Dependency>,
}

impl PageConfig {
    /// First fragment declared under `name`.
    pub fn fragment(&self, name: &str) -> Option<&FragmentConfig> {
        self.fragments.iter().find(|f| f.name == name)
    }
}

/// Fragment descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentConfig {
    /// Unique fragment name.
    pub name: String,

    /// Fragment renders itself on the client; its assets never join the eager queue.
    #[serde(default)]
    pub client_async: bool,

    /// Optional rendering attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<FragmentAttributes>,
}

impl FragmentConfig {
    /// Runtime condition gating this fragment, if any.
    pub fn condition(&self) -> Option<&str> {
        self.attributes.as_ref().and_then(|a| a.condition.as_deref())
    }

    /// True when the fragment renders only if its condition holds.
    pub fn is_conditional(&self) -> bool {
        self.condition().is_some()
    }

    /// True when the fragment's assets may be placed in the eager queue.
    pub fn is_eager(&self) -> bool {
        !self.client_async && !self.is_conditional()
    }
}

/// Rendering attributes attached to a fragment.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct FragmentAttributes {
    /// Expression deciding whether the fragment renders.
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Shared library asset (e.g. a vendor bundle).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    /// Unique dependency name.
    pub name: String,

    /// Resource URL.
    pub link: String,

    /// Set once the dependency has been queued (or was loaded by the server).
    #[serde(default)]
    pub pre_loaded: bool,
}

/// A resource one fragment needs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Asset name.
    pub name: String,

    /// Resource URL.
    pub link: String,

    /// Owning fragment name.
    pub fragment: String,

    /// Names of the dependencies this asset needs, in load order.
    #[serde(default)]
    pub dependent: Vec<String>,

    /// When the asset should be loaded.
    pub load_method: LoadMethod,

    /// Resource kind.
    #[serde(rename = "type")]
    pub kind: ResourceKind,

    /// Set once the asset has been queued.
    #[serde(default)]
    pub pre_loaded: bool,
}

/// Loading strategy, encoded as an integer on the wire.
///
/// Codes this runtime does not know are kept as [`LoadMethod::Other`]; the
/// queue builder never looks at the loading strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum LoadMethod {
    OnRenderStart,
    OnFragmentRender,
    OnPageRender,
    OnInit,
    Other(u8),
}

impl From<u8> for LoadMethod {
    fn from(value: u8) -> Self {
        match value {
            0 => LoadMethod::OnRenderStart,
            1 => LoadMethod::OnFragmentRender,
            2 => LoadMethod::OnPageRender,
            3 => LoadMethod::OnInit,
            other => LoadMethod::Other(other),
        }
    }
}

impl From<LoadMethod> for u8 {
    fn from(method: LoadMethod) -> Self {
        match method {
            LoadMethod::OnRenderStart => 0,
            LoadMethod::OnFragmentRender => 1,
            LoadMethod::OnPageRender => 2,
            LoadMethod::OnInit => 3,
            LoadMethod::Other(code) => code,
        }
    }
}

/// Resource kind, encoded as an integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ResourceKind {
    Css,
    Js,
}

impl TryFrom<u8> for ResourceKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ResourceKind::Css),
            1 => Ok(ResourceKind::Js),
            other => Err(format!("unknown resource type {}", other)),
        }
    }
}

impl From<ResourceKind> for u8 {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Css => 0,
            ResourceKind::Js => 1,
        }
    }
}
