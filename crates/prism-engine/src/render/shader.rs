use std::fs;
use std::path::Path;

/// Directories searched, relative to the working directory, for shader files.
pub const SHADER_SEARCH_PATHS: [&str; 3] = ["shaders", "../shaders", "../../shaders"];

/// One hardcoded triangle, drawn from the vertex index alone.
pub const TRIANGLE_WGSL: &str = r#"
@vertex
fn vertex_main(@builtin(vertex_index) i : u32) -> @builtin(position) vec4f {
    const pos = array(vec2f(0, 1), vec2f(-1, -1), vec2f(1, -1));
    return vec4f(pos[i], 0, 1);
}

@fragment
fn fragment_main() -> @location(0) vec4f {
    return vec4f(0.1, 0.4, 0, 1);
}
"#;

/// Where the pipeline's WGSL comes from.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum ShaderSource {
    /// The built-in triangle shader.
    #[default]
    Builtin,
    /// A file name looked up in [`SHADER_SEARCH_PATHS`].
    Search(String),
    /// Source text supplied by the caller.
    Inline(String),
}

impl ShaderSource {
    /// Resolves the source text.
    ///
    /// A file that is not found resolves to an empty string; pipeline
    /// creation then rejects it.
    pub fn load(&self) -> String {
        match self {
            ShaderSource::Builtin => TRIANGLE_WGSL.to_string(),
            ShaderSource::Search(name) => find_shader(name),
            ShaderSource::Inline(src) => src.clone(),
        }
    }
}

/// Looks `name` up in the default search paths.
pub fn find_shader(name: &str) -> String {
    find_shader_in(&SHADER_SEARCH_PATHS, name)
}

/// Returns the contents of the first `<root>/<name>` that exists, or `""`.
pub fn find_shader_in<P: AsRef<Path>>(roots: &[P], name: &str) -> String {
    for root in roots {
        let path = root.as_ref().join(name);
        if !path.exists() {
            continue;
        }
        return match fs::read_to_string(&path) {
            Ok(src) => {
                log::debug!("loaded shader {}", path.display());
                src
            }
            Err(e) => {
                log::warn!("cannot read shader {}: {e}", path.display());
                String::new()
            }
        };
    }

    log::warn!("shader {name:?} not found in any search path");
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_both_entry_points() {
        let src = ShaderSource::Builtin.load();
        assert!(src.contains("fn vertex_main"));
        assert!(src.contains("fn fragment_main"));
    }

    #[test]
    fn first_matching_root_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(second.path().join("s.wgsl"), "second").unwrap();
        fs::write(first.path().join("s.wgsl"), "first").unwrap();

        let src = find_shader_in(&[first.path(), second.path()], "s.wgsl");
        assert_eq!(src, "first");
    }

    #[test]
    fn later_root_used_when_earlier_is_missing_the_file() {
        let empty = tempfile::tempdir().unwrap();
        let full = tempfile::tempdir().unwrap();
        fs::write(full.path().join("s.wgsl"), "found").unwrap();

        assert_eq!(find_shader_in(&[empty.path(), full.path()], "s.wgsl"), "found");
    }

    #[test]
    fn missing_file_degrades_to_empty_string() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_shader_in(&[dir.path()], "nope.wgsl"), "");
        assert_eq!(
            ShaderSource::Search("definitely-not-a-shader.wgsl".to_string()).load(),
            ""
        );
    }

    #[test]
    fn inline_source_is_returned_verbatim() {
        let src = ShaderSource::Inline("abc".to_string());
        assert_eq!(src.load(), "abc");
    }
}
