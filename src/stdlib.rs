use crate::model::ModulePath;
use regex::Regex;
use std::collections::HashSet;
use std::process::Command;
use std::sync::LazyLock;

/// Catalog versions that can be targeted with `--python-version`.
pub const KNOWN_VERSIONS: &[&str] = &[
    "3.0", "3.1", "3.2", "3.3", "3.4", "3.5", "3.6", "3.7", "3.8", "3.9", "3.10", "3.11", "3.12",
    "3.13",
];

const LATEST: &str = "3.13";

/// Top-level standard-library names for one `major.minor` version.
/// Materialized once per run, never mutated.
pub struct StdlibCatalog {
    modules: HashSet<&'static str>,
}

impl StdlibCatalog {
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains(name)
    }
}

/// Whether a module path belongs to the standard library.
///
/// A verbatim catalog hit wins; otherwise any subpath of a known top-level
/// module counts as stdlib. That over-approximates: a third-party package
/// shadowing a stdlib name is misclassified, an accepted tradeoff.
pub fn is_stdlib(path: &ModulePath, catalog: &StdlibCatalog) -> bool {
    if catalog.contains(&path.dotted()) {
        return true;
    }
    catalog.contains(path.first())
}

static PATCH_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[23]\.[0-9]+\.[0-9]+$").unwrap());

/// Strips the patch component from `X.Y.Z`; anything else passes through
/// untouched and stands or falls at catalog lookup.
pub fn normalize_version(raw: &str) -> String {
    if PATCH_VERSION.is_match(raw) {
        let mut parts: Vec<&str> = raw.split('.').collect();
        parts.pop();
        parts.join(".")
    } else {
        raw.to_string()
    }
}

/// `major.minor` of the Python interpreter on PATH, when there is one and
/// the catalog knows its version; the newest known version otherwise.
pub fn default_version() -> String {
    detected_python_version()
        .filter(|version| KNOWN_VERSIONS.contains(&version.as_str()))
        .unwrap_or_else(|| LATEST.to_string())
}

fn detected_python_version() -> Option<String> {
    let output = Command::new("python3").arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout);
    let version = text.trim().strip_prefix("Python ")?;
    let mut parts = version.split('.');
    let major = parts.next()?;
    let minor = parts.next()?;
    Some(format!("{major}.{minor}"))
}

pub fn catalog_for(version: &str) -> Option<StdlibCatalog> {
    if !KNOWN_VERSIONS.contains(&version) {
        return None;
    }
    let key = parse_minor(version)?;
    let mut modules: HashSet<&'static str> = CORE_MODULES.iter().copied().collect();
    modules.extend(
        ADDED
            .iter()
            .filter(|(_, since)| *since <= key)
            .map(|(name, _)| *name),
    );
    for (name, dropped) in REMOVED {
        if *dropped <= key {
            modules.remove(name);
        }
    }
    Some(StdlibCatalog { modules })
}

fn parse_minor(version: &str) -> Option<(u8, u8)> {
    let (major, minor) = version.split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

/// Top-level modules present from 3.0 on (later drops listed in `REMOVED`).
static CORE_MODULES: &[&str] = &[
    "__future__",
    "_thread",
    "abc",
    "aifc",
    "antigravity",
    "array",
    "ast",
    "asynchat",
    "asyncore",
    "atexit",
    "audioop",
    "base64",
    "bdb",
    "binascii",
    "binhex",
    "bisect",
    "builtins",
    "bz2",
    "cProfile",
    "calendar",
    "cgi",
    "cgitb",
    "chunk",
    "cmath",
    "cmd",
    "code",
    "codecs",
    "codeop",
    "collections",
    "colorsys",
    "compileall",
    "configparser",
    "contextlib",
    "copy",
    "copyreg",
    "crypt",
    "csv",
    "ctypes",
    "curses",
    "datetime",
    "dbm",
    "decimal",
    "difflib",
    "dis",
    "distutils",
    "doctest",
    "dummy_threading",
    "email",
    "encodings",
    "errno",
    "fcntl",
    "filecmp",
    "fileinput",
    "fnmatch",
    "formatter",
    "fractions",
    "ftplib",
    "functools",
    "gc",
    "getopt",
    "getpass",
    "gettext",
    "glob",
    "grp",
    "gzip",
    "hashlib",
    "heapq",
    "hmac",
    "html",
    "http",
    "idlelib",
    "imaplib",
    "imghdr",
    "imp",
    "inspect",
    "io",
    "itertools",
    "json",
    "keyword",
    "lib2to3",
    "linecache",
    "locale",
    "logging",
    "macpath",
    "mailbox",
    "mailcap",
    "marshal",
    "math",
    "mimetypes",
    "mmap",
    "modulefinder",
    "msilib",
    "msvcrt",
    "multiprocessing",
    "netrc",
    "nis",
    "nntplib",
    "ntpath",
    "numbers",
    "operator",
    "optparse",
    "os",
    "ossaudiodev",
    "parser",
    "pdb",
    "pickle",
    "pickletools",
    "pipes",
    "pkgutil",
    "platform",
    "plistlib",
    "poplib",
    "posix",
    "posixpath",
    "pprint",
    "profile",
    "pstats",
    "pty",
    "pwd",
    "py_compile",
    "pyclbr",
    "pydoc",
    "queue",
    "quopri",
    "random",
    "re",
    "readline",
    "reprlib",
    "resource",
    "rlcompleter",
    "runpy",
    "sched",
    "select",
    "shelve",
    "shlex",
    "shutil",
    "signal",
    "site",
    "smtpd",
    "smtplib",
    "sndhdr",
    "socket",
    "socketserver",
    "spwd",
    "sqlite3",
    "ssl",
    "stat",
    "string",
    "stringprep",
    "struct",
    "subprocess",
    "sunau",
    "symbol",
    "symtable",
    "sys",
    "syslog",
    "tabnanny",
    "tarfile",
    "telnetlib",
    "tempfile",
    "termios",
    "test",
    "textwrap",
    "threading",
    "time",
    "timeit",
    "tkinter",
    "token",
    "tokenize",
    "trace",
    "traceback",
    "tty",
    "turtle",
    "turtledemo",
    "types",
    "unicodedata",
    "unittest",
    "urllib",
    "uu",
    "uuid",
    "warnings",
    "wave",
    "weakref",
    "webbrowser",
    "winreg",
    "winsound",
    "wsgiref",
    "xdrlib",
    "xml",
    "xmlrpc",
    "zipfile",
    "zipimport",
    "zlib",
];

/// Modules added after 3.0, with the first version that ships them.
static ADDED: &[(&str, (u8, u8))] = &[
    ("importlib", (3, 1)),
    ("argparse", (3, 2)),
    ("concurrent", (3, 2)),
    ("sysconfig", (3, 2)),
    ("faulthandler", (3, 3)),
    ("ipaddress", (3, 3)),
    ("lzma", (3, 3)),
    ("venv", (3, 3)),
    ("asyncio", (3, 4)),
    ("ensurepip", (3, 4)),
    ("enum", (3, 4)),
    ("pathlib", (3, 4)),
    ("selectors", (3, 4)),
    ("statistics", (3, 4)),
    ("tracemalloc", (3, 4)),
    ("typing", (3, 5)),
    ("zipapp", (3, 5)),
    ("secrets", (3, 6)),
    ("contextvars", (3, 7)),
    ("dataclasses", (3, 7)),
    ("graphlib", (3, 9)),
    ("zoneinfo", (3, 9)),
    ("tomllib", (3, 11)),
];

/// Modules dropped from the library, with the first version without them.
static REMOVED: &[(&str, (u8, u8))] = &[
    ("macpath", (3, 8)),
    ("dummy_threading", (3, 9)),
    ("formatter", (3, 10)),
    ("parser", (3, 10)),
    ("symbol", (3, 10)),
    ("binhex", (3, 11)),
    ("asynchat", (3, 12)),
    ("asyncore", (3, 12)),
    ("distutils", (3, 12)),
    ("imp", (3, 12)),
    ("smtpd", (3, 12)),
    ("aifc", (3, 13)),
    ("audioop", (3, 13)),
    ("cgi", (3, 13)),
    ("cgitb", (3, 13)),
    ("chunk", (3, 13)),
    ("crypt", (3, 13)),
    ("imghdr", (3, 13)),
    ("lib2to3", (3, 13)),
    ("mailcap", (3, 13)),
    ("msilib", (3, 13)),
    ("nis", (3, 13)),
    ("nntplib", (3, 13)),
    ("ossaudiodev", (3, 13)),
    ("pipes", (3, 13)),
    ("sndhdr", (3, 13)),
    ("spwd", (3, 13)),
    ("sunau", (3, 13)),
    ("telnetlib", (3, 13)),
    ("uu", (3, 13)),
    ("xdrlib", (3, 13)),
];
