pub async fn get() -> &'static str {
    "secret"
}
