pub async fn get() -> &'static str {
    "home"
}
