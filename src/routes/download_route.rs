use actix_web::{http::header, post, web, HttpResponse};
use serde::Deserialize;

use crate::domain::tender::PageRange;

#[derive(Deserialize)]
struct DownloadForm {
    start_page: u32,
    end_page: u32,
    csv_content: String,
}

// Echoes back the CSV carried by the results page; nothing is kept
// server-side between scrape and download.
#[post("/download")]
async fn download(form: web::Form<DownloadForm>) -> HttpResponse {
    let range = PageRange {
        start: form.start_page,
        end: form.end_page,
    };

    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/csv"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", range.csv_filename()),
        ))
        .body(form.into_inner().csv_content)
}

#[cfg(test)]
mod tests {
    use actix_web::{http::header, http::StatusCode, test, App};

    use super::download;

    #[actix_web::test]
    async fn download_echoes_csv_with_attachment_headers() {
        let app = test::init_service(App::new().service(download)).await;

        let csv_content = "Date of Publication,Type of Tender,Tender Title,Tendering Authority\n2024-03-01,General,Supply Contract,Ministry X\n";
        let req = test::TestRequest::post()
            .uri("/download")
            .set_form([
                ("start_page", "2"),
                ("end_page", "5"),
                ("csv_content", csv_content),
            ])
            .to_request();

        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );
        assert_eq!(
            res.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"result(2-5).csv\""
        );

        let body = test::read_body(res).await;
        assert_eq!(body.as_ref(), csv_content.as_bytes());
    }

    #[actix_web::test]
    async fn download_rejects_non_numeric_page_fields() {
        let app = test::init_service(App::new().service(download)).await;

        let req = test::TestRequest::post()
            .uri("/download")
            .set_form([
                ("start_page", "first"),
                ("end_page", "5"),
                ("csv_content", "header-only\n"),
            ])
            .to_request();

        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
