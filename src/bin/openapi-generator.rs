use tourney_back::services::documentation::ApiDoc;
use utoipa::OpenApi;

fn main() {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .expect("OpenAPI document serializes");
    println!("{json}");
}
