//! UI component catalog and groups

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScaffoldError;

/// A single generated UI component (`src/components/ui/<id>.tsx`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiComponent {
    Button,
    Input,
    Label,
    Card,
    Textarea,
    Select,
    Checkbox,
    Switch,
    Separator,
    Tabs,
    Accordion,
    Alert,
    Badge,
    Skeleton,
    Toast,
    Dialog,
    DropdownMenu,
    Tooltip,
    Table,
    Avatar,
    Pagination,
}

impl UiComponent {
    pub const ALL: [UiComponent; 21] = [
        UiComponent::Button,
        UiComponent::Input,
        UiComponent::Label,
        UiComponent::Card,
        UiComponent::Textarea,
        UiComponent::Select,
        UiComponent::Checkbox,
        UiComponent::Switch,
        UiComponent::Separator,
        UiComponent::Tabs,
        UiComponent::Accordion,
        UiComponent::Alert,
        UiComponent::Badge,
        UiComponent::Skeleton,
        UiComponent::Toast,
        UiComponent::Dialog,
        UiComponent::DropdownMenu,
        UiComponent::Tooltip,
        UiComponent::Table,
        UiComponent::Avatar,
        UiComponent::Pagination,
    ];

    /// Components every generated page relies on
    pub const BASE: [UiComponent; 4] = [
        UiComponent::Button,
        UiComponent::Input,
        UiComponent::Label,
        UiComponent::Card,
    ];

    /// Identifier, also the file stem
    pub fn id(&self) -> &'static str {
        match self {
            UiComponent::Button => "button",
            UiComponent::Input => "input",
            UiComponent::Label => "label",
            UiComponent::Card => "card",
            UiComponent::Textarea => "textarea",
            UiComponent::Select => "select",
            UiComponent::Checkbox => "checkbox",
            UiComponent::Switch => "switch",
            UiComponent::Separator => "separator",
            UiComponent::Tabs => "tabs",
            UiComponent::Accordion => "accordion",
            UiComponent::Alert => "alert",
            UiComponent::Badge => "badge",
            UiComponent::Skeleton => "skeleton",
            UiComponent::Toast => "toast",
            UiComponent::Dialog => "dialog",
            UiComponent::DropdownMenu => "dropdown-menu",
            UiComponent::Tooltip => "tooltip",
            UiComponent::Table => "table",
            UiComponent::Avatar => "avatar",
            UiComponent::Pagination => "pagination",
        }
    }

    /// Relative output path of the component file
    pub fn path(&self) -> String {
        format!("src/components/ui/{}.tsx", self.id())
    }
}

impl FromStr for UiComponent {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        UiComponent::ALL
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| ScaffoldError::InvalidInput {
                field: "component",
                value: s.to_string(),
                reason: "not a known UI component".to_string(),
            })
    }
}

impl fmt::Display for UiComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Named bundle of UI components offered in the prompt flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentGroup {
    Forms,
    Layout,
    Feedback,
    Overlay,
    DataDisplay,
}

impl ComponentGroup {
    pub const ALL: [ComponentGroup; 5] = [
        ComponentGroup::Forms,
        ComponentGroup::Layout,
        ComponentGroup::Feedback,
        ComponentGroup::Overlay,
        ComponentGroup::DataDisplay,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ComponentGroup::Forms => "forms",
            ComponentGroup::Layout => "layout",
            ComponentGroup::Feedback => "feedback",
            ComponentGroup::Overlay => "overlay",
            ComponentGroup::DataDisplay => "data-display",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentGroup::Forms => "Forms",
            ComponentGroup::Layout => "Layout",
            ComponentGroup::Feedback => "Feedback",
            ComponentGroup::Overlay => "Overlays",
            ComponentGroup::DataDisplay => "Data display",
        }
    }

    pub fn components(&self) -> &'static [UiComponent] {
        match self {
            ComponentGroup::Forms => &[
                UiComponent::Textarea,
                UiComponent::Select,
                UiComponent::Checkbox,
                UiComponent::Switch,
            ],
            ComponentGroup::Layout => &[
                UiComponent::Separator,
                UiComponent::Tabs,
                UiComponent::Accordion,
            ],
            ComponentGroup::Feedback => &[
                UiComponent::Alert,
                UiComponent::Badge,
                UiComponent::Skeleton,
                UiComponent::Toast,
            ],
            ComponentGroup::Overlay => &[
                UiComponent::Dialog,
                UiComponent::DropdownMenu,
                UiComponent::Tooltip,
            ],
            ComponentGroup::DataDisplay => &[
                UiComponent::Table,
                UiComponent::Avatar,
                UiComponent::Pagination,
            ],
        }
    }
}

impl FromStr for ComponentGroup {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "forms" | "form" => Ok(ComponentGroup::Forms),
            "layout" => Ok(ComponentGroup::Layout),
            "feedback" => Ok(ComponentGroup::Feedback),
            "overlay" | "overlays" => Ok(ComponentGroup::Overlay),
            "data-display" | "data" => Ok(ComponentGroup::DataDisplay),
            _ => Err(ScaffoldError::InvalidInput {
                field: "component group",
                value: s.to_string(),
                reason: format!(
                    "expected one of {}",
                    ComponentGroup::ALL.map(|g| g.id()).join(", ")
                ),
            }),
        }
    }
}

impl fmt::Display for ComponentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
