//! Renderer tests: stream data file -> generated pages

mod common;

use common::{MASTER, markdown_files, read_page, setup_workspace};
use foam_streams::pages::{render_all, render_stream_page};
use foam_streams::{Stream, StreamData};
use std::fs;

fn stream(line: &str) -> Stream {
    Stream::from_line(line).unwrap().unwrap()
}

// 全ページが生成されることを確認
#[test]
fn test_render_creates_all_pages() {
    let (temp_dir, workspace) = setup_workspace(MASTER);
    workspace.handle_update("2024-03-02").unwrap();

    assert_eq!(
        markdown_files(temp_dir.path()),
        vec![
            "000-quick-links.md",
            "all-stream-projects-generated.md",
            "all-streams--proj--infra---generated.md",
            "all-streams--proj--infra--db---generated.md",
            "all-streams--proj--web---generated.md",
            "all-streams-generated.md",
            "all-streams.md",
        ]
    );
}

// グループ分けと並び順を確認 (複数日付は昇順, 単一日付と廃止は降順)
#[test]
fn test_all_streams_page_layout() {
    let (temp_dir, workspace) = setup_workspace(MASTER);
    workspace.handle_update("2024-03-02").unwrap();

    let warning = "**THIS FILE IS AUTO GENERATED - DO NOT EDIT** - Edit streams in [[all-streams]] instead.\n\n";
    let expected = format!(
        "# all-streams-generated\n\n{w}\
Streams with double dates:\n\n\
* 2023-06-01: Long haul [[2023-01-01]] [[2023-06-01]]\n\
* 2024-02-01: Migrate cluster [[2024-01-02]] [[2024-02-01]] #proj--infra\n\
\n{w}\
Streams with single dates:\n\n\
* 2024-03-01: Quick fix [[2024-03-01]]\n\
* 2024-01-10: Write design doc [[2024-01-10]] [[proj--infra--db]]\n\
\n{w}\
Obsolete streams:\n\n\
* 2023-05-01: Retired idea [[2023-05-01]] [[proj--web]]\n\
\n{w}",
        w = warning
    );
    assert_eq!(read_page(temp_dir.path(), "all-streams-generated"), expected);
}

// プロジェクトページには子孫プロジェクトのストリームも含まれることを確認
#[test]
fn test_project_page_includes_descendants() {
    let (temp_dir, workspace) = setup_workspace(MASTER);
    workspace.handle_update("2024-03-02").unwrap();

    let page = read_page(temp_dir.path(), "all-streams--proj--infra---generated");
    assert!(page.starts_with("# all-streams--proj--infra---generated\n\n"));
    assert!(page.contains("Related pages:\n\n* proj--infra: [[proj--infra]]\n"));
    assert!(page.contains("Write design doc"));
    assert!(page.contains("Migrate cluster"));
    assert!(!page.contains("Quick fix"));

    let db_page = read_page(temp_dir.path(), "all-streams--proj--infra--db---generated");
    assert!(db_page.contains("Write design doc"));
    assert!(!db_page.contains("Migrate cluster"));
}

// プロジェクト一覧ページの内容を確認
#[test]
fn test_project_index_page() {
    let (temp_dir, workspace) = setup_workspace(MASTER);
    workspace.handle_update("2024-03-02").unwrap();

    let w = "**THIS FILE IS AUTO GENERATED - DO NOT EDIT**\n";
    let expected = format!(
        "# all-stream-projects-generated\n\n{w}\n\
## Subelements of proj\n\n\
* proj--infra: [[all-streams--proj--infra---generated]]\n\
* proj--web: [[all-streams--proj--web---generated]]\n\
\n{w}\n\
## Subelements of proj--infra\n\n\
Subelements of [[all-streams--proj--infra---generated]]:\n\n\
* proj--infra--db: [[all-streams--proj--infra--db---generated]]\n\
\n{w}\n"
    );
    assert_eq!(
        read_page(temp_dir.path(), "all-stream-projects-generated"),
        expected
    );
}

// クイックリンクページが指定日付を使うことを確認
#[test]
fn test_quick_links_use_given_date() {
    let (temp_dir, workspace) = setup_workspace(MASTER);
    workspace.handle_update("2024-03-02").unwrap();

    let page = read_page(temp_dir.path(), "000-quick-links");
    assert!(page.contains("* today: [[2024-03-02]]\n"));
    assert!(page.contains("* today meetings: [[meetings-2024-03-02]]\n"));
}

// 同じ入力から2回描画するとバイト単位で同一になることを確認
#[test]
fn test_render_is_idempotent() {
    let (temp_dir, workspace) = setup_workspace(MASTER);
    workspace.handle_update("2024-03-02").unwrap();
    let first: Vec<String> = markdown_files(temp_dir.path())
        .iter()
        .map(|n| fs::read_to_string(temp_dir.path().join(n)).unwrap())
        .collect();

    workspace.handle_render("2024-03-02").unwrap();
    let second: Vec<String> = markdown_files(temp_dir.path())
        .iter()
        .map(|n| fs::read_to_string(temp_dir.path().join(n)).unwrap())
        .collect();

    assert_eq!(first, second);

    let data = StreamData::from_master(MASTER).unwrap();
    assert_eq!(render_all(&data, "2024-03-02"), render_all(&data, "2024-03-02"));
}

// 消えたプロジェクトのページは削除されることを確認
#[test]
fn test_stale_project_pages_are_removed() {
    let (temp_dir, workspace) = setup_workspace(MASTER);
    workspace.handle_update("2024-03-02").unwrap();

    let without_web: String = MASTER
        .lines()
        .filter(|l| !l.contains("proj--web"))
        .map(|l| format!("{}\n", l))
        .collect();
    fs::write(temp_dir.path().join("all-streams.md"), without_web).unwrap();

    let message = workspace.handle_update("2024-03-02").unwrap();
    assert!(message.contains("removed 1 stale project page(s)"));
    assert!(
        !temp_dir
            .path()
            .join("all-streams--proj--web---generated.md")
            .exists()
    );
}

// ストリームデータファイルがない場合は何も書かずにエラー
#[test]
fn test_render_without_stream_data_fails() {
    let (temp_dir, workspace) = setup_workspace(MASTER);
    assert!(workspace.handle_render("2024-03-02").is_err());
    assert_eq!(markdown_files(temp_dir.path()), vec!["all-streams.md"]);
}

// 同じ日付のストリームは文書内の順序を保つことを確認
#[test]
fn test_equal_dates_keep_document_order() {
    let streams = vec![
        stream("* first [[2024-01-01]] #UPLOAD_TO_DASHBOARD"),
        stream("* second [[2024-01-01]] #UPLOAD_TO_DASHBOARD"),
        stream("* newer [[2024-02-01]] #UPLOAD_TO_DASHBOARD"),
    ];
    let page = render_stream_page("p", &streams, &[]);
    let first = page.find("first").unwrap();
    let second = page.find("second").unwrap();
    let newer = page.find("newer").unwrap();
    assert!(newer < first && first < second);
}
