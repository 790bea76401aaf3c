/// Builds a [`Watch`](crate::Watch) from one row of an address table.
///
/// ```ignore
/// watch!("Coins", 0x804cea44, Word);
/// watch!("Some bytes", 0x80fb0050, ByteArray(5));
/// watch!("FlipFlop Pipe", 0x804e26d5, BitField(0x40));
/// ```
#[macro_export]
macro_rules! watch {
    ($name:expr, $addr:expr, ByteArray($size:expr)) => {
        $crate::Watch::byte_array($name, $addr, $size)
    };
    ($name:expr, $addr:expr, BitField($mask:expr)) => {
        $crate::Watch::bit_field($name, $addr, $mask)
    };
    ($name:expr, $addr:expr, $datatype:ident) => {
        $crate::Watch::new($name, $addr, $crate::Datatype::$datatype)
    };
}
