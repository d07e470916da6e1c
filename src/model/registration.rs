use serde::Serialize;

use crate::config::ExtensionConfig;

#[derive(Debug, Serialize)]
pub struct RegistrationOutput {
    pub registration: Registration,
}

#[derive(Debug, Serialize)]
pub struct Registration {
    #[serde(rename = "menuItems")]
    pub menu_items: Vec<MenuItem>,
    pub page: Page,
}

#[derive(Debug, Serialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(rename = "isSection", skip_serializing_if = "Option::is_none")]
    pub is_section: Option<bool>,
    #[serde(rename = "sortOrder")]
    pub sort_order: i32,
}

#[derive(Debug, Serialize)]
pub struct Page {
    pub title: String,
}

impl RegistrationOutput {
    /// 管理后台扩展的菜单: 一个分组和其下的管理页面
    pub fn for_extension(extension: &ExtensionConfig) -> Self {
        let section_id = format!("{}::apps", extension.id);
        Self {
            registration: Registration {
                menu_items: vec![
                    MenuItem {
                        id: format!("{}::first", extension.id),
                        title: extension.title.clone(),
                        parent: Some(section_id.clone()),
                        is_section: None,
                        sort_order: 1,
                    },
                    MenuItem {
                        id: section_id,
                        title: extension.section.clone(),
                        parent: None,
                        is_section: Some(true),
                        sort_order: 100,
                    },
                ],
                page: Page {
                    title: extension.title.clone(),
                },
            },
        }
    }
}
