use uuid::Uuid;

/// Fresh opaque todo id: a random v4 UUID in its 32-char hex form.
///
/// Not checked against ids already in the collection.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}
