use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrintCheckError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("OCR 시크릿 키가 설정되지 않았습니다. `printcheck config --set-secret YOUR_KEY` 로 설정하세요")]
    MissingOcrSecret,

    #[error("OCR API 주소가 설정되지 않았습니다. `printcheck config --set-url URL` 로 설정하세요")]
    MissingOcrUrl,

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("폴더를 찾을 수 없습니다: {0}")]
    FolderNotFound(String),

    #[error("출력 폴더에 쓸 수 없습니다: {path} ({source})")]
    OutputNotWritable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("이미지가 없습니다: {0}")]
    NoImagesFound(String),

    #[error("명단 파일이 올바르지 않습니다: {0}")]
    InvalidRoster(String),

    #[error("결과표가 올바르지 않습니다: {0}")]
    InvalidResultTable(String),

    #[error("CSV 오류: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel 읽기 오류: {0}")]
    ExcelRead(String),

    #[error("Excel 생성 오류: {0}")]
    ExcelGeneration(String),

    #[error("작업 실행 오류: {0}")]
    Task(String),

    #[error("JSON 해석 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] printcheck_common::Error),
}

pub type Result<T> = std::result::Result<T, PrintCheckError>;

/// 이미지 1장 처리 중의 실패. 배치 전체를 멈추지 않고 해당 이미지의 표식 레코드로 처리한다.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("이미지 전처리 실패: {0}")]
    Preprocess(String),

    #[error("이미지 읽기 실패: {0}")]
    ImageRead(#[from] std::io::Error),

    #[error("OCR 요청 실패: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OCR 응답 상태 이상 ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("OCR 응답 형식 이상: {0}")]
    MalformedResponse(String),
}
