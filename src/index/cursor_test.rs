use super::*;

fn build_region(fps: &[[u8; 20]], names: Option<&[u32]>) -> (Vec<u8>, usize, Option<usize>) {
    let mut region = vec![0u8; 8]; // arbitrary header
    let sha_ofs = region.len();
    for fp in fps {
        region.extend_from_slice(fp);
    }
    let name_ofs = names.map(|ns| {
        let ofs = region.len();
        for n in ns {
            region.extend_from_slice(&n.to_be_bytes());
        }
        ofs
    });
    (region, sha_ofs, name_ofs)
}

#[test]
fn test_cursor_walks_entries_in_order() {
    let fps = [[1u8; 20], [2u8; 20], [3u8; 20]];
    let (region, sha_ofs, name_ofs) = build_region(&fps, Some(&[10, 20, 30]));
    let input = InputIndex {
        map: &region,
        len: fps.len(),
        sha_ofs,
        name_ofs,
        name_base: 100,
    };

    let mut cursor = IndexCursor::new(&input).unwrap();
    let mut seen = vec![];
    while !cursor.exhausted() {
        seen.push((cursor.key().to_vec(), cursor.name()));
        cursor.advance();
    }
    assert_eq!(
        seen,
        vec![
            (vec![1u8; 20], 110),
            (vec![2u8; 20], 120),
            (vec![3u8; 20], 130),
        ]
    );
}

#[test]
fn test_cursor_without_name_array_uses_name_base() {
    let fps = [[9u8; 20]];
    let (region, sha_ofs, _) = build_region(&fps, None);
    let input = InputIndex {
        map: &region,
        len: fps.len(),
        sha_ofs,
        name_ofs: None,
        name_base: 42,
    };

    let cursor = IndexCursor::new(&input).unwrap();
    assert_eq!(cursor.name(), 42);
}

#[test]
fn test_cursor_rejects_out_of_bounds_sha_array() {
    let region = vec![0u8; 10];
    let input = InputIndex {
        map: &region,
        len: 5,
        sha_ofs: 0,
        name_ofs: None,
        name_base: 0,
    };
    assert!(IndexCursor::new(&input).is_err());
}
