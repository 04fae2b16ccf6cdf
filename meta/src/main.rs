fn main() {
    multiversx_sc_meta_lib::cli_main::<pledge_registry::AbiProvider>();
}
