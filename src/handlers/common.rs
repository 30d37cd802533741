pub async fn root() -> &'static str {
    "無限スクロールするフィードのデモです。GET /feed で中身が見られます"
}

pub async fn health() -> &'static str {
    "OK"
}
