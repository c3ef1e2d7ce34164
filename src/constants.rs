pub const API_NAME: &str = "[ofertas-api]";
