//! Naming conventions shared by the generated source and header.
//!
//! Native code linked against the generated files depends on these exact
//! spellings, so they live in one place instead of being scattered through
//! the emitter.

/// Fixed identifiers and prefixes used when rendering generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Name reported in the "generated file" banner.
    pub generator_name: &'static str,
    /// Build command the banner points at for regenerating the files.
    pub regenerate_command: &'static str,
    /// Prefix turning a declared function name into its native name (`gl`).
    pub function_prefix: &'static str,
    /// Prefix turning a declared enum name into its native name (`GL_`).
    pub enum_prefix: &'static str,
    /// Prefix of every dispatch pointer variable.
    pub dispatch_prefix: &'static str,
    /// Prefix of every stub function.
    pub stub_prefix: &'static str,
    /// Version, in tenths, that every implementation is assumed to support.
    pub baseline_version: u32,
    /// Runtime helpers the generated stubs call into.
    pub runtime: RuntimeHelpers,
    /// Function that resets every dispatch pointer to its stub.
    pub initializer_fn: &'static str,
}

/// Names of the hand-written runtime functions referenced by the stubs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeHelpers {
    /// Called first in every stub.
    pub check_initialized: &'static str,
    /// `bool f(int version_tenths)`.
    pub check_version: &'static str,
    /// `bool f(const char *extension)`.
    pub check_extension: &'static str,
    /// Resolves a core entry point by native name.
    pub get_core_proc: &'static str,
    /// Resolves an extension entry point by native name.
    pub get_ext_proc: &'static str,
    /// Reports that no synonym of a function is available.
    pub unsupported: &'static str,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generator_name: "gldispatch",
            regenerate_command: "make piglit_dispatch_gen",
            function_prefix: "gl",
            enum_prefix: "GL_",
            dispatch_prefix: "__piglit_dispatch_",
            stub_prefix: "stub_",
            baseline_version: 10,
            runtime: RuntimeHelpers::default(),
            initializer_fn: "initialize_dispatch_pointers",
        }
    }
}

impl Default for RuntimeHelpers {
    fn default() -> Self {
        Self {
            check_initialized: "__check_initialized",
            check_version: "__check_version",
            check_extension: "__check_extension",
            get_core_proc: "__get_core_proc",
            get_ext_proc: "__get_ext_proc",
            unsupported: "__unsupported",
        }
    }
}

impl GeneratorConfig {
    /// Native name of a declared function, e.g. `MapBuffer` -> `glMapBuffer`.
    pub fn native_name(&self, name: &str) -> String {
        format!("{}{name}", self.function_prefix)
    }

    /// Pointer typedef name of a declared function, e.g.
    /// `MapBuffer` -> `PFNGLMAPBUFFERPROC`.
    pub fn typedef_name(&self, name: &str) -> String {
        format!("PFN{}PROC", self.native_name(name).to_uppercase())
    }

    /// Dispatch pointer variable for a set whose primary is `name`.
    pub fn dispatch_name(&self, name: &str) -> String {
        format!("{}{}", self.dispatch_prefix, self.native_name(name))
    }

    /// Stub function for a set whose primary is `name`.
    pub fn stub_name(&self, name: &str) -> String {
        format!("{}{}", self.stub_prefix, self.native_name(name))
    }

    /// Native name of a declared enum, e.g. `FRONT` -> `GL_FRONT`.
    pub fn enum_name(&self, name: &str) -> String {
        format!("{}{name}", self.enum_prefix)
    }
}

/// Declared functions whose resolved pointer must be cast to a typedef other
/// than their own.
///
/// `TexImage3DEXT` takes a `GLenum` internal format where `TexImage3D` takes a
/// `GLint`. The two are call-compatible, and the resolved pointer is stored in
/// the core function's slot.
pub const TYPEDEF_OVERRIDES: &[(&str, &str)] = &[("TexImage3DEXT", "PFNGLTEXIMAGE3DPROC")];

/// Look up a typedef override for a declared function name.
pub fn typedef_override(name: &str) -> Option<&'static str> {
    TYPEDEF_OVERRIDES
        .iter()
        .find(|(declared, _)| *declared == name)
        .map(|(_, typedef)| *typedef)
}
