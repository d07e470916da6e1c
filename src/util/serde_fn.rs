use serde::{Deserialize, Deserializer};

/// 查询参数里的布尔开关: `true`/`1`/`yes` 为真, 其它值都为假
pub fn bool_like<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(match s {
        Some(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        None => false,
    })
}
