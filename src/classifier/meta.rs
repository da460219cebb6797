use serde::{Deserialize, Serialize};

/// Marker the build step attaches to methods that are automatically
/// runnable test cases.
pub const TEST_MARKER: &str = "test";

/// Structural facts about one compiled suite, recorded by the build step
/// so classification never has to execute suite code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteMeta {
    /// Abstract suites cannot be instantiated and are never runnable
    /// themselves, even when they declare test-marked methods.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    /// Custom execution strategy the suite supplies for itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner: Option<String>,

    #[serde(default)]
    pub constructors: Vec<ConstructorMeta>,

    /// Declared and inherited methods; the build step flattens the
    /// inheritance chain into this list.
    #[serde(default)]
    pub methods: Vec<MethodMeta>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstructorMeta {
    /// Parameter type names, in declaration order.
    #[serde(default)]
    pub params: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodMeta {
    pub name: String,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub markers: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl SuiteMeta {
    pub fn has_no_arg_constructor(&self) -> bool {
        self.constructors.iter().any(|c| c.params.is_empty())
    }

    /// True when at least one publicly reachable method carries the test
    /// marker.
    pub fn has_test_method(&self) -> bool {
        self.methods.iter().any(|m| {
            m.visibility == Visibility::Public && m.markers.iter().any(|k| k == TEST_MARKER)
        })
    }
}
