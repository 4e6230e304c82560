mod common;

use axum::http::{header, StatusCode};

use common::{pdf_part, spawn_app, FilePart};

#[tokio::test]
async fn dropped_resume_can_be_listed_downloaded_and_deleted() {
    let app = spawn_app();
    let upload = FilePart {
        file_name: "Jane Doe CV.pdf".into(),
        ..pdf_part(4096)
    };

    let res = app.post_multipart("/upload-resume", &[], Some(upload)).await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.json());
    let body = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Resume uploaded successfully");
    let filename = body["filename"].as_str().unwrap().to_string();
    let id = body["id"].as_str().unwrap().to_string();
    assert!(filename.ends_with("-Jane_Doe_CV.pdf"));

    let listed = app.get("/resumes", true).await.json();
    let resumes = listed.as_array().unwrap();
    assert_eq!(resumes.len(), 1);
    assert_eq!(resumes[0]["originalName"], "Jane Doe CV.pdf");
    assert_eq!(resumes[0]["source"], "drop-resume");
    assert_eq!(resumes[0]["size"], 4096);

    let res = app
        .get(&format!("/resumes/download/{}", filename), true)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.bytes.len(), 4096);
    assert_eq!(
        res.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Jane Doe CV.pdf\""
    );
    assert_eq!(res.headers[header::CONTENT_TYPE], "application/pdf");

    let res = app.get(&format!("/uploads/resumes/{}", filename), false).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.delete(&format!("/resumes/{}", id)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(app
        .get("/resumes", true)
        .await
        .json()
        .as_array()
        .unwrap()
        .is_empty());
    assert!(!app.uploads.join("resumes").join(&filename).exists());
    assert_eq!(
        app.delete(&format!("/resumes/{}", id)).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn resume_named_with_repeated_dots_can_be_downloaded_and_deleted() {
    let app = spawn_app();
    let upload = FilePart {
        file_name: "my..cv.pdf".into(),
        ..pdf_part(256)
    };
    let body = app
        .post_multipart("/upload-resume", &[], Some(upload))
        .await
        .json();
    let filename = body["filename"].as_str().unwrap().to_string();
    let id = body["id"].as_str().unwrap().to_string();
    assert!(filename.ends_with("-my..cv.pdf"));

    let res = app
        .get(&format!("/resumes/download/{}", filename), true)
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.json());
    assert_eq!(res.bytes.len(), 256);
    assert_eq!(
        res.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"my..cv.pdf\""
    );

    let res = app.delete(&format!("/resumes/{}", id)).await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.json());
    assert!(app.get("/resumes", true).await.json().as_array().unwrap().is_empty());
    assert!(!app.uploads.join("resumes").join(&filename).exists());
}

#[tokio::test]
async fn drop_resume_over_the_body_limit_is_too_large() {
    let app = spawn_app();
    let res = app
        .post_multipart("/upload-resume", &[], Some(pdf_part(17 * 1024 * 1024)))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "File size exceeds 5MB limit");
    assert!(app.get("/resumes", true).await.json().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn drop_resume_accepts_only_pdf() {
    let app = spawn_app();
    let docx = FilePart {
        file_name: "cv.docx".into(),
        content_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            .into(),
        ..pdf_part(100)
    };
    let res = app.post_multipart("/upload-resume", &[], Some(docx)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.post_multipart("/upload-resume", &[], None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn download_rejects_missing_and_traversing_names() {
    let app = spawn_app();
    let res = app.get("/resumes/download/123-nothing.pdf", true).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.get("/resumes/download/..%2Fsecret.pdf", true).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.get("/resumes/download/123-nothing.pdf", false).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}
