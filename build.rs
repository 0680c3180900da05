fn main() {
    // Resource embedding only applies to Windows executables.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }

    let mut res = winres::WindowsResource::new();
    res.set("FileDescription", "Glasspane semi-transparent overlay");
    res.set("ProductName", "Glasspane");
    if let Err(e) = res.compile() {
        println!("cargo:warning=failed to embed Windows resources: {e}");
    }
}
