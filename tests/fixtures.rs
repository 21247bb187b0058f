//! Reference artifacts shared by the integration tests.
//!
//! Produced with OpenSSL and sbsign from a Linaro test key:
//! the certificate is self-signed (subject == issuer), the PKCS#7 message
//! is a detached sbsign image signature embedding that certificate, and
//! the key blob is the certificate's RSAPublicKey with the
//! SubjectPublicKeyInfo wrapper stripped.

// Each test binary compiles this module on its own and uses a subset.
#![allow(dead_code)]

use hex_literal::hex;

/// Self-signed X.509 certificate, 971 bytes.
pub const CERTIFICATE: &[u8] = &hex!(
    "308203c7308202afa003020102020900d7170a76d5d34deb300d06092a864886"
    "f70d01010b0500307a310b3009060355040613024a50310e300c06035504080c"
    "05546f6b796f310e300c06035504070c05546f6b796f310f300d060355040a0c"
    "064c696e61726f310b3009060355040b0c025357310f300d06035504030c0654"
    "6573746572311c301a06092a864886f70d010901160d7465737440746573742e"
    "6f7267301e170d3139313031383033313333315a170d32303130313730333133"
    "33315a307a310b3009060355040613024a50310e300c06035504080c05546f6b"
    "796f310e300c06035504070c05546f6b796f310f300d060355040a0c064c696e"
    "61726f310b3009060355040b0c025357310f300d06035504030c065465737465"
    "72311c301a06092a864886f70d010901160d7465737440746573742e6f726730"
    "820122300d06092a864886f70d01010105000382010f003082010a0282010100"
    "9f374d957e36b7aff4d6ce3904eebf36b2cca38b9eac628ae9ae18cfe895fdcb"
    "ad348a5f55e60c5ef876c1a2c3d473138a711bfd5827ea4d41ff63bbad9762ba"
    "e4e59745a35bd55b53551019faacbddb776223503f35db8af6ee7a31ec92f578"
    "3592763c5fe7eec9ed011c4255d67ea6ca7cd11516877c9963c0a92549bc4edc"
    "2d4bcb52d767e9836b5e5b488033e9cce8fe19c8c2617452259248eaad151664"
    "6e533077a2ef61921b5ebe07f23cf8357d764f78a92af132ffec89a9224c3dc8"
    "65caf4a26d3fa40afa9ee4f0db39b1f9f0fb048144a7d761df2d13452caef00e"
    "c4075d7d2bb22075336b5bf7e71751f1abc19ec6f030c625263ed7d7a3cc1595"
    "0203010001a350304e301d0603551d0e04160414458a76f74ff40ea0f202e1e7"
    "e9c77d51559233cd301f0603551d23041830168014458a76f74ff40ea0f202e1"
    "e7e9c77d51559233cd300c0603551d13040530030101ff300d06092a864886f7"
    "0d01010b050003820101004793820e8a709d6c7adb04b4c9ef9828c6d95390c8"
    "25830723e75938c1c050289992fb212472e5a6573031b3dfa017a9739c3983fb"
    "e4fa201dfa33200c722a5040bd2d33a2fc06f9fe864f501d6537e9303382a175"
    "8f5d33840df20904c07a1279db4f7704e4d80b8719bab73ca645aa91627f017d"
    "c6206d7115745e87b360179cc0ed014bb32324c1cb7a8303262dde47c5119428"
    "271592008b2e5142ca4b4a2c513756d0bc33d5d53e795c3f9d6eb1e971f12ce9"
    "b4882cd24997ce299416c9f9640ed0d97a53101aee8373931bdf8a77c05663ab"
    "5a65c5c53bf33080fc388bc9cdc34f2e2d67cc17189b3ec64703fc35a835065a"
    "77e59771bb27930d1f0e8c"
);

/// Detached PKCS#7 signature over a kernel image, 1811 bytes.
pub const PKCS7_MESSAGE: &[u8] = &hex!(
    "3082070f06092a864886f70d010702a0820700308206fc020101310f300d0609"
    "60864801650304020105003078060a2b060104018237020104a06a3068303306"
    "0a2b06010401823702010f3025030100a020a21e801c003c003c003c004f0062"
    "0073006f006c006500740065003e003e003e3031300d06096086480165030402"
    "01050004209e90996df2b53d3ffc38b6f21fd2248843777dc12c9e8af6f7dd9e"
    "9c5f1836c5a08203cb308203c7308202afa003020102020900d7170a76d5d34d"
    "eb300d06092a864886f70d01010b0500307a310b3009060355040613024a5031"
    "0e300c06035504080c05546f6b796f310e300c06035504070c05546f6b796f31"
    "0f300d060355040a0c064c696e61726f310b3009060355040b0c025357310f30"
    "0d06035504030c06546573746572311c301a06092a864886f70d010901160d74"
    "65737440746573742e6f7267301e170d3139313031383033313333315a170d32"
    "30313031373033313333315a307a310b3009060355040613024a50310e300c06"
    "035504080c05546f6b796f310e300c06035504070c05546f6b796f310f300d06"
    "0355040a0c064c696e61726f310b3009060355040b0c025357310f300d060355"
    "04030c06546573746572311c301a06092a864886f70d010901160d7465737440"
    "746573742e6f726730820122300d06092a864886f70d01010105000382010f00"
    "3082010a02820101009f374d957e36b7aff4d6ce3904eebf36b2cca38b9eac62"
    "8ae9ae18cfe895fdcbad348a5f55e60c5ef876c1a2c3d473138a711bfd5827ea"
    "4d41ff63bbad9762bae4e59745a35bd55b53551019faacbddb776223503f35db"
    "8af6ee7a31ec92f5783592763c5fe7eec9ed011c4255d67ea6ca7cd11516877c"
    "9963c0a92549bc4edc2d4bcb52d767e9836b5e5b488033e9cce8fe19c8c26174"
    "52259248eaad1516646e533077a2ef61921b5ebe07f23cf8357d764f78a92af1"
    "32ffec89a9224c3dc865caf4a26d3fa40afa9ee4f0db39b1f9f0fb048144a7d7"
    "61df2d13452caef00ec4075d7d2bb22075336b5bf7e71751f1abc19ec6f030c6"
    "25263ed7d7a3cc15950203010001a350304e301d0603551d0e04160414458a76"
    "f74ff40ea0f202e1e7e9c77d51559233cd301f0603551d23041830168014458a"
    "76f74ff40ea0f202e1e7e9c77d51559233cd300c0603551d13040530030101ff"
    "300d06092a864886f70d01010b050003820101004793820e8a709d6c7adb04b4"
    "c9ef9828c6d95390c825830723e75938c1c050289992fb212472e5a6573031b3"
    "dfa017a9739c3983fbe4fa201dfa33200c722a5040bd2d33a2fc06f9fe864f50"
    "1d6537e9303382a1758f5d33840df20904c07a1279db4f7704e4d80b8719bab7"
    "3ca645aa91627f017dc6206d7115745e87b360179cc0ed014bb32324c1cb7a83"
    "03262dde47c5119428271592008b2e5142ca4b4a2c513756d0bc33d5d53e795c"
    "3f9d6eb1e971f12ce9b4882cd24997ce299416c9f9640ed0d97a53101aee8373"
    "931bdf8a77c05663ab5a65c5c53bf33080fc388bc9cdc34f2e2d67cc17189b3e"
    "c64703fc35a835065a77e59771bb27930d1f0e8c3182029b3082029702010130"
    "8187307a310b3009060355040613024a50310e300c06035504080c05546f6b79"
    "6f310e300c06035504070c05546f6b796f310f300d060355040a0c064c696e61"
    "726f310b3009060355040b0c025357310f300d06035504030c06546573746572"
    "311c301a06092a864886f70d010901160d7465737440746573742e6f72670209"
    "00d7170a76d5d34deb300d06096086480165030402010500a081e5301906092a"
    "864886f70d010903310c060a2b060104018237020104301c06092a864886f70d"
    "010905310f170d3139313031383035353532365a302f06092a864886f70d0109"
    "043122042013e92dcd3543e01334c567dedd75dc6297767d5ba0b44d4fefb8a7"
    "9550cb0fec307906092a864886f70d01090f316c306a300b0609608648016503"
    "04012a300b0609608648016503040116300b0609608648016503040102300a06"
    "082a864886f70d0307300e06082a864886f70d030202020080300d06082a8648"
    "86f70d0302020140300706052b0e030207300d06082a864886f70d0302020128"
    "300d06092a864886f70d010101050004820100384009c7c4f77848751eb25095"
    "0a52ee5760c5f4dbca67b019ad68b1e11eb7f6533d13b11137a76e9b181d0ebd"
    "c4b2d0366c0c5a1150ccdb1f6bcb2880d53c4f930bd14575a18900717d55cc1c"
    "0ac9c4e687f2870d2e79718501d732879a11c69abb0a7bcefec8ee103ca647dd"
    "bba7f51950d52a11442f65096950fabd02e490dc2a7cdb8203a52891747cd383"
    "c8111a141bbab182bd53ad9c3405fa2d14585e5064605c217ce6f02ba2ece5eb"
    "da88e219369665f74c629b7524b4b13483ba0501d8e133d31ad6098431d067f3"
    "3b0e19987e07dce1d84584a2dd8a046a43cfff7c9e83a85dbc1f45865b2dcd9d"
    "a0ba4dd2c6b9c534392920ee2760469c62bef2"
);

/// Bare 2048-bit RSAPublicKey blob, 270 bytes.
pub const RSA_PUBLIC_KEY: &[u8] = &hex!(
    "3082010a0282010100ca2523e00a4d8f56fcc9064ccc9443e056446e37548712"
    "84f9074fe42340c343843786d39d951ce48a660209e23dce2cc6026ad46561ff"
    "856f8863ba31621eb795e9083ce935defd6592b89e71a4cd47fd0426b978bf05"
    "0dfc008408fcc44beaf597680d97d7ff4f9282d7bbefb7678e7254e8c59efdd8"
    "38e9be19375b368bbf49a1593a9dad92080be3a4a47dd370c0b8fbc7dad31986"
    "379acdab3096aba4a231a038fbbf85d32439edbfe131ed6c39c1e5052e123036"
    "735d62f382af38c8cafaa199573ce1c17b050bcc2ea910c868bd27b6199cd2ad"
    "b31fca356e8423a1e9a44cab1909796e3c7b74fc3305cfa42eeb556005c7cf3f"
    "92ac2d690b191679750203010001"
);
