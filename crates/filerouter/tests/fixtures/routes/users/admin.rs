pub async fn get() -> &'static str {
    "admin"
}
