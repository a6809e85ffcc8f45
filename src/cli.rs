use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "printcheck")]
#[command(about = "프린트 제출 사진 판독・제출 현황 매트릭스 생성 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 사진 폴더를 판독해 결과표・실패 목록・제출 매트릭스를 출력
    Run {
        /// 사진 폴더 경로
        #[arg(required = true)]
        folder: PathBuf,

        /// 학생 명단 파일 (csv/xlsx)
        #[arg(short, long, required = true)]
        roster: PathBuf,

        /// 출력 디렉터리 (기본: 현재 디렉터리)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 매트릭스 출력 형식 (csv/xlsx/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 자를 상단 영역 높이 (px, 기본: 설정값)
        #[arg(long)]
        crop_height: Option<u32>,

        /// 동시 OCR 요청 수 (기본: 설정값)
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,

        /// OCR 캐시 사용 (같은 사진 재판독 생략)
        #[arg(long)]
        use_cache: bool,

        /// 명단 중복을 에러로 처리
        #[arg(long)]
        strict_roster: bool,
    },

    /// 기존 결과표(result.csv)에서 제출 매트릭스만 다시 생성
    Matrix {
        /// 결과표 CSV
        #[arg(required = true)]
        input: PathBuf,

        /// 출력 디렉터리 (기본: 결과표와 같은 폴더)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 출력 형식 (csv/xlsx/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
    },

    /// 텍스트에 필드 추출・명단 대조만 적용 (패턴 확인용)
    Extract {
        /// 학생 명단 파일 (csv/xlsx)
        #[arg(short, long, required = true)]
        roster: PathBuf,

        /// OCR 텍스트 (생략 시 표준 입력)
        text: Vec<String>,
    },

    /// 설정 표시/편집
    Config {
        /// OCR 시크릿 키 설정
        #[arg(long)]
        set_secret: Option<String>,

        /// OCR API 주소 설정
        #[arg(long)]
        set_url: Option<String>,

        /// 설정 표시
        #[arg(long)]
        show: bool,
    },

    /// OCR 캐시 관리
    Cache {
        /// 캐시 삭제
        #[arg(long)]
        clear: bool,

        /// 대상 폴더 (생략 시 현재 폴더)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// 캐시 정보 표시
        #[arg(long)]
        info: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
    Both,
}

impl ExportFormat {
    pub fn includes_csv(&self) -> bool {
        matches!(self, ExportFormat::Csv | ExportFormat::Both)
    }

    pub fn includes_xlsx(&self) -> bool {
        matches!(self, ExportFormat::Xlsx | ExportFormat::Both)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, xlsx, or both", s)),
        }
    }
}
