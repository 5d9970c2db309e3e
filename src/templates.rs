use tera::Tera;

use crate::config::TEMPLATE_GLOB;
use crate::error::AppError;

/// Initialize the Tera template engine
pub fn init_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::new(TEMPLATE_GLOB)?;

    tera.register_filter("badge_class", badge_class_filter);

    Ok(tera)
}

/// Map a configured badge color to its stylesheet class.
///
/// Unknown colors fall back to the neutral class so a typo in the config
/// cannot fail the page render.
fn badge_class_filter(
    value: &tera::Value,
    _args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let color = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("badge_class filter expects a string"))?;

    let class = match color.trim().to_ascii_lowercase().as_str() {
        "blue" => "badge-blue",
        "green" => "badge-green",
        _ => "badge-neutral",
    };

    Ok(tera::Value::String(class.to_string()))
}
