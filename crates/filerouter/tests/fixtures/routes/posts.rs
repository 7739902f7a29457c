pub async fn get() -> String {
    summary(2)
}

pub fn summary(count: usize) -> String {
    format!("{} posts", count)
}
