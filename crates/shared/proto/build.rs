use std::env;
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use prost::Message;
use prost_types::FileDescriptorSet;

const PROTOS: &[&str] = &[
    "proto/barmetler/core.proto",
    "proto/barmetler/person.proto",
    "proto/barmetler/user.proto",
];

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let descriptor_path = out_dir.join("barmetler_descriptor.bin");

    // Use the bundled protoc so no system install is needed
    env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    let well_known = protoc_bin_vendored::include_path()?;

    // Messages only; there are no services to generate
    tonic_build::configure()
        .build_server(false)
        .build_client(false)
        .file_descriptor_set_path(&descriptor_path)
        .compile_protos(PROTOS, &[PathBuf::from("proto"), well_known])?;

    write_wire_fields(&descriptor_path, &out_dir.join("wire_fields.rs"))?;

    println!("cargo:rerun-if-changed=proto/");

    Ok(())
}

/// Generate `WireFields` impls for every message in the `barmetler.*` packages.
fn write_wire_fields(descriptor_path: &Path, target: &Path) -> Result<(), Box<dyn Error>> {
    let descriptors = FileDescriptorSet::decode(fs::read(descriptor_path)?.as_slice())?;
    let mut code = String::new();

    for file in &descriptors.file {
        let package = file.package();
        if !package.starts_with("barmetler.") {
            continue;
        }
        let module = package.replace('.', "::");

        for message in &file.message_type {
            let name = message.name();
            let fields = message
                .field
                .iter()
                .map(|field| format!("{:?}", field.name()))
                .collect::<Vec<_>>()
                .join(", ");

            writeln!(
                code,
                "impl crate::WireFields for crate::{module}::{name} {{\n    \
                 const MESSAGE_NAME: &'static str = \"{package}.{name}\";\n    \
                 const FIELD_NAMES: &'static [&'static str] = &[{fields}];\n}}\n"
            )?;
        }
    }

    fs::write(target, code)?;
    Ok(())
}
