use crate::client::{Lun, MappedLun, Target, Volume};
use crate::error::SynoIscsiError;
use crate::lun_type;
use crate::utils::{parse_bytes, readable_byte_size};
use tabled::settings::{Padding, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct VolumeRow {
    #[tabled(rename = "PATH")]
    path: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "FILESYSTEM")]
    filesystem: String,
    #[tabled(rename = "SIZE")]
    size: String,
    #[tabled(rename = "USED")]
    used: String,
}

#[derive(Tabled)]
struct LunRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "VOLUME")]
    volume: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "SIZE")]
    size: String,
    #[tabled(rename = "USED")]
    used: String,
    #[tabled(rename = "THIN")]
    thin: String,
}

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "IQN")]
    iqn: String,
    #[tabled(rename = "SESSIONS")]
    sessions: String,
    #[tabled(rename = "LUNS")]
    luns: String,
}

/// Gap between columns.
const COLUMN_GAP: usize = 2;

/// Left-aligned columns separated by spaces. Lines start at column zero and
/// carry no trailing padding.
fn render<T: Tabled>(rows: Vec<T>) -> String {
    let table = Table::new(rows)
        .with(Style::empty())
        .with(Padding::new(0, COLUMN_GAP, 0, 0))
        .to_string();

    table
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Volume listing. Size and used fall back to `?` when the appliance reports
/// a capacity that does not parse.
pub fn volume_table(volumes: &[Volume]) -> String {
    let rows = volumes
        .iter()
        .map(|volume| {
            let (size, used) = match (parse_bytes(&volume.size), parse_bytes(&volume.free)) {
                (Some(size), Some(free)) => (
                    readable_byte_size(size),
                    readable_byte_size(size.saturating_sub(free)),
                ),
                _ => ("?".to_string(), "?".to_string()),
            };

            VolumeRow {
                path: volume.path.clone(),
                status: volume.status.clone(),
                filesystem: volume.fs_type.clone(),
                size,
                used,
            }
        })
        .collect();

    render::<VolumeRow>(rows)
}

pub fn lun_table(luns: &[Lun]) -> String {
    let rows = luns
        .iter()
        .map(|lun| LunRow {
            name: lun.name.clone(),
            volume: lun.location.clone(),
            status: lun.status.clone(),
            size: readable_byte_size(lun.size),
            used: readable_byte_size(lun.used),
            thin: if lun_type::is_thin(lun.lun_type) {
                "yes"
            } else {
                "no"
            }
            .to_string(),
        })
        .collect();

    render::<LunRow>(rows)
}

pub fn target_table(targets: &[Target], luns: &[Lun]) -> String {
    let rows = targets
        .iter()
        .map(|target| TargetRow {
            name: target.name.clone(),
            iqn: target.iqn.clone(),
            sessions: format!(
                "{}/{}",
                target.connected_sessions.len(),
                target.max_sessions
            ),
            luns: mapped_lun_names(luns, &target.mapped_luns),
        })
        .collect();

    render::<TargetRow>(rows)
}

/// Comma-joined names of the mapped LUNs, in mapping order. Mappings whose
/// LUN is not in `luns` are left out.
pub fn mapped_lun_names(luns: &[Lun], mapped: &[MappedLun]) -> String {
    mapped
        .iter()
        .flat_map(|m| luns.iter().filter(move |lun| lun.uuid == m.lun_uuid))
        .map(|lun| lun.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Line printed for a failed command. Errors with a precise operator-facing
/// message are shown as-is; anything passed through from the transport is
/// flagged as unknown.
pub fn error_line(error: &SynoIscsiError) -> String {
    if error.is_user_facing() {
        format!("Error: {}", error)
    } else {
        format!("Unknown error: {}", error)
    }
}

/// Display error message in consistent format
pub fn display_error(error: &SynoIscsiError) {
    eprintln!("{}", error_line(error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::fixtures;

    fn data_lines(table: &str) -> Vec<&str> {
        table.lines().collect()
    }

    #[test]
    fn test_volume_table() {
        let table = volume_table(&[fixtures::vol1(), fixtures::vol2()]);
        let lines = data_lines(&table);
        assert_eq!(lines.len(), 3);

        for term in ["PATH", "STATUS", "FILESYSTEM", "SIZE", "USED"] {
            assert!(lines[0].contains(term));
        }
        for term in ["/vol1", "normal", "ext4", "10.00 GiB", "5.00 GiB"] {
            assert!(lines[1].contains(term), "missing {:?} in {:?}", term, lines[1]);
        }
        for term in ["/vol2", "degraded", "btrfs", "5.00 GiB", "0.00 B"] {
            assert!(lines[2].contains(term), "missing {:?} in {:?}", term, lines[2]);
        }
    }

    #[test]
    fn test_volume_table_unparseable_capacity() {
        let mut volume = fixtures::vol1();
        volume.size = "n/a".to_string();

        let table = volume_table(&[volume]);
        let lines = data_lines(&table);
        assert!(lines[1].contains('?'));
    }

    #[test]
    fn test_lun_table() {
        let table = lun_table(&[fixtures::lun1(), fixtures::lun2()]);
        let lines = data_lines(&table);
        assert_eq!(lines.len(), 3);

        for term in ["lun1", "/vol1", "normal", "5.00 GiB", "3.00 GiB", "no"] {
            assert!(lines[1].contains(term), "missing {:?} in {:?}", term, lines[1]);
        }
        for term in ["lun2", "/vol2", "degraded", "5.00 GiB", "0.00 B", "yes"] {
            assert!(lines[2].contains(term), "missing {:?} in {:?}", term, lines[2]);
        }
    }

    #[test]
    fn test_target_table() {
        let luns = [fixtures::lun1(), fixtures::lun2()];
        let table = target_table(&[fixtures::target1(), fixtures::target2()], &luns);
        let lines = data_lines(&table);
        assert_eq!(lines.len(), 3);

        for term in ["target1", "iqn.2000-01.com.synology:target1", "1/2", "lun1,lun2"] {
            assert!(lines[1].contains(term), "missing {:?} in {:?}", term, lines[1]);
        }
        for term in ["target2", "iqn.2000-01.com.synology:target2", "0/1", "lun1"] {
            assert!(lines[2].contains(term), "missing {:?} in {:?}", term, lines[2]);
        }
    }

    #[test]
    fn test_columns_are_aligned() {
        let table = lun_table(&[fixtures::lun1(), fixtures::lun2()]);
        let lines = data_lines(&table);
        let column = lines[0].find("VOLUME").unwrap();
        assert_eq!(lines[1].find("/vol1"), Some(column));
        assert_eq!(lines[2].find("/vol2"), Some(column));
    }

    #[test]
    fn test_rows_start_at_column_zero() {
        let table = volume_table(&[fixtures::vol1()]);
        let lines = data_lines(&table);
        assert!(lines[0].starts_with("PATH"));
        assert!(lines[1].starts_with("/vol1"));
        assert!(lines.iter().all(|line| !line.ends_with(' ')));

        let column = lines[0].find("STATUS").unwrap();
        assert_eq!(&lines[0][column - COLUMN_GAP..column], "  ");
    }

    #[test]
    fn test_error_line() {
        assert_eq!(
            error_line(&SynoIscsiError::LunNotFound("lun3".into())),
            "Error: could not find LUN with name: lun3"
        );
        assert_eq!(
            error_line(&SynoIscsiError::Api { code: 18990002 }),
            "Unknown error: DSM API error. Error code: 18990002"
        );
    }

    #[test]
    fn test_mapped_lun_names_skips_unknown() {
        let luns = [fixtures::lun1()];
        let mapped = fixtures::target1().mapped_luns;
        assert_eq!(mapped_lun_names(&luns, &mapped), "lun1");
        assert_eq!(mapped_lun_names(&luns, &[]), "");
    }
}
