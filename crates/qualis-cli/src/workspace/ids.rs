/// `tpl_` followed by the first group of a v4 UUID.
pub fn new_template_id() -> String {
    format!("tpl_{}", short_id())
}

fn short_id() -> String {
    let id = uuid::Uuid::new_v4().to_string();
    match id.split('-').next() {
        Some(part) if !part.is_empty() => part.to_string(),
        _ => id,
    }
}
