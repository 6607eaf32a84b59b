use super::pagination::*;

#[test]
fn test_page_request_default() {
    let request = PageRequest::default();
    assert_eq!(request.page, 1);
    assert_eq!(request.per_page, 50);
}

#[test]
fn test_page_request_offset() {
    assert_eq!(PageRequest::page(1).offset(), 0);
    assert_eq!(PageRequest::page(3).offset(), 100);
    assert_eq!(PageRequest::page(0).offset(), 0);
}

#[test]
fn test_page_response_new() {
    let data = vec![1, 2, 3];
    let response = PageResponse::new(data.clone(), 1, 50, 3);

    assert_eq!(response.data, data);
    assert_eq!(response.meta.total_pages, 1);
    assert_eq!(response.meta.window, vec![1]);
}

#[test]
fn test_page_response_total_pages_rounds_up() {
    let response: PageResponse<u8> = PageResponse::new(vec![], 1, 50, 101);
    assert_eq!(response.meta.total_pages, 3);

    let response: PageResponse<u8> = PageResponse::new(vec![], 1, 50, 100);
    assert_eq!(response.meta.total_pages, 2);
}

#[test]
fn test_page_response_empty() {
    let response: PageResponse<u8> = PageResponse::new(vec![], 1, 50, 0);
    assert_eq!(response.meta.total_pages, 1);
}

#[test]
fn test_page_window_few_pages() {
    assert_eq!(page_window(2, 4), vec![1, 2, 3, 4]);
    assert_eq!(page_window(1, 10), (1..=10).collect::<Vec<_>>());
}

#[test]
fn test_page_window_near_start() {
    assert_eq!(page_window(3, 30), (1..=10).collect::<Vec<_>>());
    assert_eq!(page_window(5, 30), (1..=10).collect::<Vec<_>>());
}

#[test]
fn test_page_window_near_end() {
    assert_eq!(page_window(30, 30), (21..=30).collect::<Vec<_>>());
    assert_eq!(page_window(26, 30), (21..=30).collect::<Vec<_>>());
}

#[test]
fn test_page_window_middle() {
    assert_eq!(page_window(15, 30), (11..=20).collect::<Vec<_>>());
    assert_eq!(page_window(6, 30), (2..=11).collect::<Vec<_>>());
}

#[test]
fn test_page_window_always_contains_current() {
    for total in 1..40 {
        for current in 1..=total {
            let window = page_window(current, total);
            assert!(window.contains(&current), "page {current} of {total}");
            assert!(window.len() <= 10);
        }
    }
}
