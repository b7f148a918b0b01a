pub async fn hello() -> &'static str {
    "Hello From RH Electronics!!"
}
